/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

/// The six registered tables, in the fixed order parents precede children.
/// `Table::ALL` *is* `registered_tables`'s default order; it is a constant,
/// not a runtime-mutable list, so upload/download ordering can't be
/// reshuffled by accident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    WorkoutLogs,
    Sets,
    Runs,
    Messages,
    ReadinessScores,
    PrHistory,
}

impl Table {
    pub const ALL: [Table; 6] = [
        Table::WorkoutLogs,
        Table::Sets,
        Table::Runs,
        Table::Messages,
        Table::ReadinessScores,
        Table::PrHistory,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Table::WorkoutLogs => "workout_logs",
            Table::Sets => "sets",
            Table::Runs => "runs",
            Table::Messages => "messages",
            Table::ReadinessScores => "readiness_scores",
            Table::PrHistory => "pr_history",
        }
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
