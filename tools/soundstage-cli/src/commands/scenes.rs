//! Validate and inspect a scene list.

use std::path::PathBuf;

use soundstage_overlay_model::{parse_scene_list, validate_scene_list};
use soundstage_sync_core::scene_tracker::active_index;

pub fn run(scenes_path: PathBuf, at: Option<u64>) -> anyhow::Result<()> {
    let json = std::fs::read_to_string(&scenes_path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", scenes_path.display()))?;
    let scenes = parse_scene_list(&json)
        .map_err(|e| anyhow::anyhow!("Invalid scene list {}: {e}", scenes_path.display()))?;

    println!("Scene list: {}", scenes_path.display());
    println!("  Scenes: {}", scenes.len());

    if let Err(error) = validate_scene_list(&scenes) {
        println!("\nValidation failed: {error}");
        anyhow::bail!("Scene list is not usable");
    }

    for (index, scene) in scenes.iter().enumerate() {
        println!(
            "  [{index}] {} .. {} ({} ms)",
            scene.start,
            scene.end,
            scene.span_ms()
        );
    }

    if let Some(t_ms) = at {
        match active_index(&scenes, t_ms as f64) {
            Some(index) => println!("\nActive scene at {t_ms} ms: {index}"),
            None => println!("\nActive scene at {t_ms} ms: none"),
        }
    }

    println!("\nScene list is valid.");
    Ok(())
}
