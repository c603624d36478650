use strum::{Display, EnumIter};

/// Which slice of the tracker an aggregation looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
pub enum Mode {
    /// Issues closed inside the window; time-to-close is computed.
    #[strum(serialize = "closed")]
    Closed,

    /// Issues created inside the window, whatever their current state.
    #[strum(serialize = "open")]
    Open,
}

impl Mode {
    /// Value of the `status` query parameter asking the server for this mode's issues.
    #[must_use]
    pub const fn status_filter(self) -> &'static str {
        match self {
            Self::Closed => "Closed",
            Self::Open => "all",
        }
    }
}
