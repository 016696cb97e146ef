//! Load state of a remotely hosted avatar asset and its local fallback.
//!
//! The renderer never blocks on the network: while an asset is loading or
//! after it failed, the orb keeps drawing a local procedural style.

/// Where a remote asset is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetState {
    /// Request in flight.
    Loading,
    /// Asset available.
    Ready,
    /// Last attempt failed.
    Failed {
        /// Attempts made so far.
        attempts: u32,
        /// Last error message.
        error: String,
    },
}

/// What to draw for an asset-backed entity this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetVisual<'a> {
    /// The remote asset at this URL.
    Remote(&'a str),
    /// The local procedural style with this registry id.
    Fallback(&'a str),
}

/// A remote asset with a local fallback style and a bounded retry budget.
#[derive(Debug, Clone)]
pub struct RemoteAsset {
    url: String,
    fallback_style: String,
    state: AssetState,
    attempts: u32,
    max_attempts: u32,
}

impl RemoteAsset {
    /// Start loading `url`; `fallback_style` is drawn until it is ready.
    pub fn new(
        url: impl Into<String>,
        fallback_style: impl Into<String>,
        max_attempts: u32,
    ) -> Self {
        Self {
            url: url.into(),
            fallback_style: fallback_style.into(),
            state: AssetState::Loading,
            attempts: 0,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Current state.
    pub fn state(&self) -> &AssetState {
        &self.state
    }

    /// Mark the in-flight load as successful.
    pub fn mark_ready(&mut self) {
        if self.state == AssetState::Loading {
            log::debug!("remote asset '{}' ready", self.url);
            self.state = AssetState::Ready;
        }
    }

    /// Mark the in-flight load as failed.
    pub fn mark_failed(&mut self, error: impl Into<String>) {
        if self.state != AssetState::Loading {
            return;
        }
        self.attempts += 1;
        let attempts = self.attempts;
        let error = error.into();
        log::warn!(
            "remote asset '{}' failed (attempt {attempts}/{}): {error}; \
             drawing '{}'",
            self.url,
            self.max_attempts,
            self.fallback_style
        );
        self.state = AssetState::Failed { attempts, error };
    }

    /// Failed attempts so far.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Re-enter `Loading` after a failure. Returns `false` once the retry
    /// budget is spent (or when not failed).
    pub fn retry(&mut self) -> bool {
        let failed = matches!(self.state, AssetState::Failed { .. });
        if !failed || self.attempts >= self.max_attempts {
            return false;
        }
        self.state = AssetState::Loading;
        true
    }

    /// Remote asset when ready, local fallback otherwise.
    pub fn visual(&self) -> AssetVisual<'_> {
        match self.state {
            AssetState::Ready => AssetVisual::Remote(&self.url),
            _ => AssetVisual::Fallback(&self.fallback_style),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_until_ready() {
        let mut asset = RemoteAsset::new("https://cdn/zero.splinecode", "liquid_magnetic", 3);
        assert_eq!(asset.visual(), AssetVisual::Fallback("liquid_magnetic"));
        asset.mark_ready();
        assert_eq!(asset.visual(), AssetVisual::Remote("https://cdn/zero.splinecode"));
    }

    #[test]
    fn retries_up_to_cap() {
        let mut asset = RemoteAsset::new("u", "liquid_magnetic", 2);
        asset.mark_failed("timeout");
        assert_eq!(asset.attempts(), 1);
        assert!(asset.retry());
        assert_eq!(*asset.state(), AssetState::Loading);
        asset.mark_failed("timeout");
        assert_eq!(asset.attempts(), 2);
        assert!(!asset.retry());
        assert!(matches!(asset.state(), AssetState::Failed { attempts: 2, .. }));
        assert_eq!(asset.visual(), AssetVisual::Fallback("liquid_magnetic"));
    }

    #[test]
    fn retry_only_after_failure() {
        let mut asset = RemoteAsset::new("u", "f", 3);
        assert!(!asset.retry());
        asset.mark_ready();
        asset.mark_failed("late");
        assert_eq!(*asset.state(), AssetState::Ready);
        assert!(!asset.retry());
    }
}
