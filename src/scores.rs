//! Best score persistence
//!
//! A single number in LocalStorage. Stored as a plain decimal string rather
//! than JSON so the value stays compatible with hand-edited storage.

/// Highest score ever reached on this browser
#[derive(Debug, Clone, Copy, Default)]
pub struct BestScore {
    pub value: u32,
}

impl BestScore {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "math_rain_best_score";

    pub fn new() -> Self {
        Self { value: 0 }
    }

    /// Record a finished run's score, returning true when it set a new best
    pub fn record(&mut self, score: u32) -> bool {
        if score > self.value {
            self.value = score;
            return true;
        }
        false
    }

    /// Load the best score from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(raw)) = storage.get_item(Self::STORAGE_KEY) {
                let value = raw.trim().parse::<u32>().unwrap_or(0);
                log::info!("Loaded best score: {}", value);
                return Self { value };
            }
        }

        log::info!("No best score found, starting fresh");
        Self::new()
    }

    /// Save the best score to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            let _ = storage.set_item(Self::STORAGE_KEY, &self.value.to_string());
            log::info!("Best score saved: {}", self.value);
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_keeps_the_maximum() {
        let mut best = BestScore::new();

        assert!(best.record(300));
        assert_eq!(best.value, 300);

        assert!(!best.record(150));
        assert_eq!(best.value, 300);

        assert!(!best.record(300));
        assert_eq!(best.value, 300);

        assert!(best.record(301));
        assert_eq!(best.value, 301);
    }

    #[test]
    fn test_zero_score_never_beats_fresh_best() {
        let mut best = BestScore::new();
        assert!(!best.record(0));
        assert_eq!(best.value, 0);
    }
}
