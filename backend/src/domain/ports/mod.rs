//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod account_directory;
mod notification_sink;
mod program_command;
mod program_query;
mod program_repository;

#[cfg(test)]
pub use account_directory::MockAccountDirectory;
pub use account_directory::{AccountDirectory, AccountDirectoryError, FixtureAccountDirectory};
#[cfg(test)]
pub use notification_sink::MockNotificationSink;
pub use notification_sink::{FixtureNotificationSink, NotificationSink, NotificationSinkError};
#[cfg(test)]
pub use program_command::MockProgramCommand;
pub use program_command::{
    CreateProgramRequest, EnrollmentPayload, FixtureProgramCommand, JoinProgramRequest,
    ProgramCommand, ProgramPayload,
};
#[cfg(test)]
pub use program_query::MockProgramQuery;
pub use program_query::{
    AdminProgramPayload, FixtureProgramQuery, GetProgramRequest, ListProgramsRequest,
    MentorPayload, NotificationPayload, ProgramQuery,
};
#[cfg(test)]
pub use program_repository::MockProgramRepository;
pub use program_repository::{
    FixtureProgramRepository, ProgramRepository, ProgramRepositoryError,
};
