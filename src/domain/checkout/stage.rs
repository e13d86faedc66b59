//! Checkout state machine
//!
//! `Started → Validated → OrderCreated → ItemsCreated → CartCleared →
//! VehiclesMarkedUnavailable → Committed`, with `Failed(stage)` reachable
//! from every non-terminal state. The failed stage is the one that was
//! being attempted when the error occurred.

/// Stage of one checkout attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CheckoutStage {
    Started,
    Validated,
    OrderCreated,
    ItemsCreated,
    CartCleared,
    VehiclesMarkedUnavailable,
    Committed,
}

impl CheckoutStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Started => "Started",
            Self::Validated => "Validated",
            Self::OrderCreated => "OrderCreated",
            Self::ItemsCreated => "ItemsCreated",
            Self::CartCleared => "CartCleared",
            Self::VehiclesMarkedUnavailable => "VehiclesMarkedUnavailable",
            Self::Committed => "Committed",
        }
    }

    pub fn next(self) -> Option<Self> {
        match self {
            Self::Started => Some(Self::Validated),
            Self::Validated => Some(Self::OrderCreated),
            Self::OrderCreated => Some(Self::ItemsCreated),
            Self::ItemsCreated => Some(Self::CartCleared),
            Self::CartCleared => Some(Self::VehiclesMarkedUnavailable),
            Self::VehiclesMarkedUnavailable => Some(Self::Committed),
            Self::Committed => None,
        }
    }
}

impl std::fmt::Display for CheckoutStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Observable state of a checkout attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutState {
    /// Last stage successfully reached
    At(CheckoutStage),
    Failed(CheckoutStage),
}

impl CheckoutState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::At(CheckoutStage::Committed) | Self::Failed(_))
    }
}

/// Tracks progress through the stages, one step at a time
#[derive(Debug, Clone)]
pub struct CheckoutProgress {
    state: CheckoutState,
}

impl CheckoutProgress {
    pub fn new() -> Self {
        Self {
            state: CheckoutState::At(CheckoutStage::Started),
        }
    }

    pub fn state(&self) -> CheckoutState {
        self.state
    }

    /// Stage the next step is trying to reach
    pub fn attempting(&self) -> CheckoutStage {
        match self.state {
            CheckoutState::At(stage) => stage.next().unwrap_or(stage),
            CheckoutState::Failed(stage) => stage,
        }
    }

    /// Record that the attempted stage was reached. Terminal states do not move.
    pub fn advance(&mut self) -> CheckoutStage {
        if let CheckoutState::At(stage) = self.state {
            if let Some(next) = stage.next() {
                self.state = CheckoutState::At(next);
                return next;
            }
            return stage;
        }
        self.attempting()
    }

    /// Move to `Failed` at the attempted stage and return that stage
    pub fn fail(&mut self) -> CheckoutStage {
        let stage = self.attempting();
        if !self.state.is_terminal() {
            self.state = CheckoutState::Failed(stage);
        }
        stage
    }
}

impl Default for CheckoutProgress {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_every_stage_in_order() {
        let mut progress = CheckoutProgress::new();
        let mut seen = vec![];
        while !progress.state().is_terminal() {
            seen.push(progress.advance());
        }
        assert_eq!(
            seen,
            vec![
                CheckoutStage::Validated,
                CheckoutStage::OrderCreated,
                CheckoutStage::ItemsCreated,
                CheckoutStage::CartCleared,
                CheckoutStage::VehiclesMarkedUnavailable,
                CheckoutStage::Committed,
            ]
        );
    }

    #[test]
    fn failure_records_attempted_stage() {
        let mut progress = CheckoutProgress::new();
        progress.advance(); // Validated
        progress.advance(); // OrderCreated
        assert_eq!(progress.fail(), CheckoutStage::ItemsCreated);
        assert_eq!(progress.state(), CheckoutState::Failed(CheckoutStage::ItemsCreated));
    }

    #[test]
    fn failed_state_is_sticky() {
        let mut progress = CheckoutProgress::new();
        progress.fail();
        assert_eq!(progress.advance(), CheckoutStage::Validated);
        assert_eq!(progress.state(), CheckoutState::Failed(CheckoutStage::Validated));
    }

    #[test]
    fn committed_cannot_fail() {
        let mut progress = CheckoutProgress::new();
        while !progress.state().is_terminal() {
            progress.advance();
        }
        progress.fail();
        assert_eq!(progress.state(), CheckoutState::At(CheckoutStage::Committed));
    }
}
