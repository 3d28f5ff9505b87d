mod job;
mod message;
mod notification;
mod occurrence;
mod reminder;
mod shared;

pub use chrono_tz::Tz;
pub use job::ReminderJob;
pub use message::Message;
pub use notification::Notification;
pub use occurrence::next_occurrence;
pub use reminder::{
    InvalidReminderError, RecurrenceRule, Reminder, ReminderSchedule, ReminderScheduleInput,
    ReminderUpdate, REMINDER_NOTIFICATION_TITLE,
};
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use shared::recurrence::{parse_weekday, RecurrenceType, TimeOfDay};
