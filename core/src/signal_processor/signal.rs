use streamlink_types::DetectorPolicy;

/// Why the streak went back to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetReason {
    EnteredActivity,
    LeftActivity,
    LocalPlayerDied,
    /// A killing blow landed on the local player.
    LocalPlayerKilled,
}

/// Signals emitted by the EventProcessor and the roster path.
/// Handlers turn these into persisted files and host alerts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameSignal {
    SelfIdentified {
        agent_id: u64,
        team: u16,
    },
    ContextChanged {
        qualifying: bool,
        policy: DetectorPolicy,
    },
    StreakIncremented {
        value: u32,
        target_id: u64,
        time: u64,
    },
    StreakReset {
        previous: u32,
        reason: ResetReason,
    },
    MilestoneReached {
        value: u32,
    },
    DuplicateKillIgnored {
        target_id: u64,
        time: u64,
    },
    GroupStatusChanged {
        grouped: bool,
        members: usize,
    },
}
