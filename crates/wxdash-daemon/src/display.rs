//! Log-based stand-in for the dashboard: reports every state transition

use tokio::sync::watch;
use tracing::{info, warn};
use wxdash_core::CaptureTime;
use wxdash_refresh::DisplayState;

/// One-line summary of what the dashboard would show
pub fn summary_line(state: &DisplayState) -> String {
    let snap = &state.snapshot;
    let r = &snap.reading;

    let image = match &snap.last_image {
        Some(image) => match &image.captured_at {
            CaptureTime::At(at) => format!("image {}", at.format("%H:%M:%S")),
            CaptureTime::Label(label) => format!("image {}", label),
        },
        None => "no image".to_string(),
    };

    format!(
        "{:.1} °C | {} % | {:.1} hPa | {:.1} km/h | {} ({}%) | {} | updated {}",
        r.temperature,
        r.humidity,
        r.pressure,
        r.wind_speed,
        snap.forecast.status,
        snap.forecast.confidence,
        image,
        state.last_updated_at.format("%H:%M:%S"),
    )
}

/// Follow the controller until it goes away
pub async fn follow(mut rx: watch::Receiver<DisplayState>) {
    while rx.changed().await.is_ok() {
        let state = rx.borrow_and_update().clone();

        if state.is_refreshing {
            info!("Refreshing station data...");
            continue;
        }

        match &state.last_error {
            Some(error) => warn!(%error, "Showing last good snapshot: {}", summary_line(&state)),
            None => info!("{}", summary_line(&state)),
        }
    }
}
