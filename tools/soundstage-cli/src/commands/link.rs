//! Parse a deep link into a playback source.

use soundstage_overlay_model::DeepLink;

pub fn run(url: String) -> anyhow::Result<()> {
    match DeepLink::parse(&url) {
        Ok(link) => {
            println!("Playback source:");
            println!("  Audio: {}", link.audio);
            println!("  Transcript: {}", link.transcript);
            println!("  Visualizer: {}", link.visualizer);
            Ok(())
        }
        Err(error) => {
            // All three parameters are required before playback can start.
            println!("Content not ready: {error}");
            Err(error.into())
        }
    }
}
