use crate::shared::{
    entity::{Entity, ID},
    recurrence::{parse_weekdays, RecurrenceType, TimeOfDay},
};
use thiserror::Error;

/// Title of every `Notification` created when a `Reminder` fires
pub const REMINDER_NOTIFICATION_TITLE: &str = "Medication Reminder";

/// A `Reminder` is the intent of a `User` to be notified about taking
/// a medicine, either once or on a recurring schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub id: ID,
    /// The owner, which is also the only receiver of the reminder
    pub user_id: ID,
    pub medicine_id: Option<ID>,
    pub medicine_name: String,
    pub schedule: ReminderSchedule,
    pub message: Option<String>,
    /// Only meaningful for one-off reminders, true once it has fired
    pub sent: bool,
    /// Only meaningful for recurring reminders, the last time it fired.
    /// It is also the anchor for `RecurrenceType::EveryX`.
    pub last_run: Option<i64>,
    pub created: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReminderSchedule {
    Once { scheduled_at: i64 },
    Recurring(RecurrenceRule),
}

/// The raw recurrence definition of a `Reminder`.
///
/// `time` and `days_of_week` are kept as provided so that a stored rule
/// which has become malformed can still be loaded. Such a rule simply
/// never produces an occurrence.
#[derive(Debug, Clone, PartialEq)]
pub struct RecurrenceRule {
    pub recurrence_type: RecurrenceType,
    /// "HH:MM" in server local time
    pub time: String,
    /// Only used by `RecurrenceType::Weekly`, e.g. ["Mon", "Wed"]
    pub days_of_week: Vec<String>,
    /// Only used by `RecurrenceType::EveryX`
    pub every_x_days: Option<i64>,
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidReminderError {
    #[error("A medicine name is required")]
    MissingMedicineName,
    #[error("A one-off reminder requires `scheduledAt`")]
    MissingScheduledAt,
    #[error("A recurring reminder requires `recurrenceType`")]
    MissingRecurrenceType,
    #[error("A recurring reminder requires `time`")]
    MissingTime,
    #[error("Malformed time: {0}, expected HH:MM")]
    MalformedTime(String),
    #[error("A weekly reminder requires at least one valid day in `daysOfWeek`")]
    MissingDaysOfWeek,
    #[error("`everyXDays` must be between 1 and 3650 days")]
    InvalidEveryXDays,
}

/// Longest interval accepted for an `everyX` reminder, ten years
pub const MAX_EVERY_X_DAYS: i64 = 3650;

/// The scheduling fields a client provides when creating or updating a `Reminder`
#[derive(Debug, Clone, Default)]
pub struct ReminderScheduleInput {
    pub scheduled_at: Option<i64>,
    pub is_recurring: bool,
    pub recurrence_type: Option<RecurrenceType>,
    pub days_of_week: Option<Vec<String>>,
    pub time: Option<String>,
    pub every_x_days: Option<i64>,
}

impl ReminderScheduleInput {
    pub fn into_schedule(self) -> Result<ReminderSchedule, InvalidReminderError> {
        if !self.is_recurring {
            let scheduled_at = self
                .scheduled_at
                .ok_or(InvalidReminderError::MissingScheduledAt)?;
            return Ok(ReminderSchedule::Once { scheduled_at });
        }

        let recurrence_type = self
            .recurrence_type
            .ok_or(InvalidReminderError::MissingRecurrenceType)?;
        let time = self.time.ok_or(InvalidReminderError::MissingTime)?;
        let time = time
            .parse::<TimeOfDay>()
            .map_err(|_| InvalidReminderError::MalformedTime(time.clone()))?
            .to_string();

        let rule = match recurrence_type {
            RecurrenceType::Daily => RecurrenceRule {
                recurrence_type,
                time,
                days_of_week: Vec::new(),
                every_x_days: None,
            },
            RecurrenceType::Weekly => {
                let days_of_week = self.days_of_week.unwrap_or_default();
                if parse_weekdays(&days_of_week).is_empty() {
                    return Err(InvalidReminderError::MissingDaysOfWeek);
                }
                RecurrenceRule {
                    recurrence_type,
                    time,
                    days_of_week,
                    every_x_days: None,
                }
            }
            RecurrenceType::EveryX => match self.every_x_days {
                Some(days) if (1..=MAX_EVERY_X_DAYS).contains(&days) => RecurrenceRule {
                    recurrence_type,
                    time,
                    days_of_week: Vec::new(),
                    every_x_days: Some(days),
                },
                _ => return Err(InvalidReminderError::InvalidEveryXDays),
            },
        };

        Ok(ReminderSchedule::Recurring(rule))
    }
}

/// A partial update of a `Reminder`. Fields that are `None` keep their
/// current value, which also makes it possible to switch between a
/// one-off and a recurring reminder.
#[derive(Debug, Clone, Default)]
pub struct ReminderUpdate {
    pub medicine_id: Option<ID>,
    pub medicine_name: Option<String>,
    pub message: Option<String>,
    pub scheduled_at: Option<i64>,
    pub is_recurring: Option<bool>,
    pub recurrence_type: Option<RecurrenceType>,
    pub days_of_week: Option<Vec<String>>,
    pub time: Option<String>,
    pub every_x_days: Option<i64>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Reminder {
    pub fn new(
        user_id: ID,
        medicine_id: Option<ID>,
        medicine_name: String,
        message: Option<String>,
        schedule: ReminderScheduleInput,
        created: i64,
    ) -> Result<Self, InvalidReminderError> {
        let medicine_name =
            non_blank(Some(medicine_name)).ok_or(InvalidReminderError::MissingMedicineName)?;
        let schedule = schedule.into_schedule()?;

        Ok(Self {
            id: Default::default(),
            user_id,
            medicine_id,
            medicine_name,
            schedule,
            message: non_blank(message),
            sent: false,
            last_run: None,
            created,
        })
    }

    pub fn is_recurring(&self) -> bool {
        matches!(self.schedule, ReminderSchedule::Recurring(_))
    }

    pub fn scheduled_at(&self) -> Option<i64> {
        match self.schedule {
            ReminderSchedule::Once { scheduled_at } => Some(scheduled_at),
            ReminderSchedule::Recurring(_) => None,
        }
    }

    pub fn recurrence(&self) -> Option<&RecurrenceRule> {
        match &self.schedule {
            ReminderSchedule::Recurring(rule) => Some(rule),
            ReminderSchedule::Once { .. } => None,
        }
    }

    /// A one-off reminder that has fired can never fire again
    pub fn is_spent(&self) -> bool {
        !self.is_recurring() && self.sent
    }

    /// A one-off reminder that has not fired yet and whose time has come
    pub fn is_overdue(&self, now: i64) -> bool {
        match self.schedule {
            ReminderSchedule::Once { scheduled_at } => !self.sent && scheduled_at <= now,
            ReminderSchedule::Recurring(_) => false,
        }
    }

    /// The text delivered when the reminder fires
    pub fn content(&self) -> String {
        match &self.message {
            Some(message) if !message.trim().is_empty() => message.clone(),
            _ => format!("Time to take {}", self.medicine_name),
        }
    }

    /// Records that the reminder fired at `now`
    pub fn mark_fired(&mut self, now: i64) {
        if self.is_recurring() {
            self.last_run = Some(now);
        } else {
            self.sent = true;
        }
    }

    pub fn apply_update(&mut self, update: ReminderUpdate) -> Result<(), InvalidReminderError> {
        let (current_scheduled_at, current_rule) = match &self.schedule {
            ReminderSchedule::Once { scheduled_at } => (Some(*scheduled_at), None),
            ReminderSchedule::Recurring(rule) => (None, Some(rule)),
        };

        let schedule = ReminderScheduleInput {
            scheduled_at: update.scheduled_at.or(current_scheduled_at),
            is_recurring: update.is_recurring.unwrap_or_else(|| self.is_recurring()),
            recurrence_type: update
                .recurrence_type
                .or_else(|| current_rule.map(|r| r.recurrence_type)),
            days_of_week: update
                .days_of_week
                .or_else(|| current_rule.map(|r| r.days_of_week.clone())),
            time: update.time.or_else(|| current_rule.map(|r| r.time.clone())),
            every_x_days: update
                .every_x_days
                .or_else(|| current_rule.and_then(|r| r.every_x_days)),
        }
        .into_schedule()?;

        let medicine_name = match update.medicine_name {
            Some(name) => non_blank(Some(name)).ok_or(InvalidReminderError::MissingMedicineName)?,
            None => self.medicine_name.clone(),
        };

        self.schedule = schedule;
        self.medicine_name = medicine_name;
        if let Some(medicine_id) = update.medicine_id {
            self.medicine_id = Some(medicine_id);
        }
        if let Some(message) = non_blank(update.message) {
            self.message = Some(message);
        }

        Ok(())
    }
}

impl Entity for Reminder {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn daily_input(time: &str) -> ReminderScheduleInput {
        ReminderScheduleInput {
            is_recurring: true,
            recurrence_type: Some(RecurrenceType::Daily),
            time: Some(time.into()),
            ..Default::default()
        }
    }

    #[test]
    fn creates_one_off_reminder() {
        let reminder = Reminder::new(
            ID::default(),
            None,
            "Aspirin".into(),
            None,
            ReminderScheduleInput {
                scheduled_at: Some(1000),
                ..Default::default()
            },
            0,
        )
        .expect("Valid one-off reminder");

        assert_eq!(reminder.scheduled_at(), Some(1000));
        assert!(!reminder.is_recurring());
        assert!(!reminder.sent);
        assert_eq!(reminder.last_run, None);
    }

    #[test]
    fn rejects_blank_medicine_name() {
        let res = Reminder::new(ID::default(), None, "  ".into(), None, daily_input("08:00"), 0);
        assert_eq!(res.unwrap_err(), InvalidReminderError::MissingMedicineName);
    }

    #[test]
    fn rejects_invalid_schedules() {
        let cases = vec![
            (
                ReminderScheduleInput::default(),
                InvalidReminderError::MissingScheduledAt,
            ),
            (
                ReminderScheduleInput {
                    is_recurring: true,
                    time: Some("08:00".into()),
                    ..Default::default()
                },
                InvalidReminderError::MissingRecurrenceType,
            ),
            (
                ReminderScheduleInput {
                    is_recurring: true,
                    recurrence_type: Some(RecurrenceType::Daily),
                    ..Default::default()
                },
                InvalidReminderError::MissingTime,
            ),
            (
                daily_input("25:00"),
                InvalidReminderError::MalformedTime("25:00".into()),
            ),
            (
                ReminderScheduleInput {
                    is_recurring: true,
                    recurrence_type: Some(RecurrenceType::Weekly),
                    time: Some("08:00".into()),
                    days_of_week: Some(vec!["Someday".into()]),
                    ..Default::default()
                },
                InvalidReminderError::MissingDaysOfWeek,
            ),
            (
                ReminderScheduleInput {
                    is_recurring: true,
                    recurrence_type: Some(RecurrenceType::EveryX),
                    time: Some("08:00".into()),
                    every_x_days: Some(0),
                    ..Default::default()
                },
                InvalidReminderError::InvalidEveryXDays,
            ),
            (
                ReminderScheduleInput {
                    is_recurring: true,
                    recurrence_type: Some(RecurrenceType::EveryX),
                    time: Some("08:00".into()),
                    every_x_days: Some(MAX_EVERY_X_DAYS + 1),
                    ..Default::default()
                },
                InvalidReminderError::InvalidEveryXDays,
            ),
            (
                ReminderScheduleInput {
                    is_recurring: true,
                    recurrence_type: Some(RecurrenceType::EveryX),
                    time: Some("08:00".into()),
                    every_x_days: Some(1_000_000_000_000),
                    ..Default::default()
                },
                InvalidReminderError::InvalidEveryXDays,
            ),
        ];

        for (input, expected) in cases {
            assert_eq!(input.into_schedule().unwrap_err(), expected);
        }
    }

    #[test]
    fn normalizes_time_and_drops_fields_of_other_recurrence_types() {
        let schedule = ReminderScheduleInput {
            is_recurring: true,
            recurrence_type: Some(RecurrenceType::Daily),
            time: Some("8:05".into()),
            days_of_week: Some(vec!["Mon".into()]),
            every_x_days: Some(3),
            scheduled_at: Some(100),
        }
        .into_schedule()
        .unwrap();

        assert_eq!(
            schedule,
            ReminderSchedule::Recurring(RecurrenceRule {
                recurrence_type: RecurrenceType::Daily,
                time: "08:05".into(),
                days_of_week: Vec::new(),
                every_x_days: None,
            })
        );
    }

    #[test]
    fn content_defaults_to_medicine_name() {
        let mut reminder =
            Reminder::new(ID::default(), None, "Ibuprofen".into(), None, daily_input("08:00"), 0)
                .unwrap();
        assert_eq!(reminder.content(), "Time to take Ibuprofen");

        reminder.message = Some("Take it with water".into());
        assert_eq!(reminder.content(), "Take it with water");
    }

    #[test]
    fn marks_fired_according_to_mode() {
        let mut recurring =
            Reminder::new(ID::default(), None, "A".into(), None, daily_input("08:00"), 0).unwrap();
        recurring.mark_fired(500);
        assert_eq!(recurring.last_run, Some(500));
        assert!(!recurring.sent);

        let mut one_off = Reminder::new(
            ID::default(),
            None,
            "A".into(),
            None,
            ReminderScheduleInput {
                scheduled_at: Some(400),
                ..Default::default()
            },
            0,
        )
        .unwrap();
        assert!(one_off.is_overdue(400));
        one_off.mark_fired(500);
        assert!(one_off.sent);
        assert!(one_off.is_spent());
        assert!(!one_off.is_overdue(500));
    }

    #[test]
    fn update_keeps_unspecified_fields() {
        let mut reminder = Reminder::new(
            ID::default(),
            None,
            "Aspirin".into(),
            Some("Morning pill".into()),
            ReminderScheduleInput {
                is_recurring: true,
                recurrence_type: Some(RecurrenceType::Weekly),
                days_of_week: Some(vec!["Mon".into(), "Wed".into()]),
                time: Some("08:00".into()),
                ..Default::default()
            },
            0,
        )
        .unwrap();

        reminder
            .apply_update(ReminderUpdate {
                time: Some("09:30".into()),
                message: Some("".into()),
                ..Default::default()
            })
            .unwrap();

        let rule = reminder.recurrence().expect("Still recurring");
        assert_eq!(rule.time, "09:30");
        assert_eq!(rule.days_of_week, vec!["Mon".to_string(), "Wed".to_string()]);
        assert_eq!(reminder.message, Some("Morning pill".into()));
        assert_eq!(reminder.medicine_name, "Aspirin");
    }

    #[test]
    fn update_can_switch_mode() {
        let mut reminder =
            Reminder::new(ID::default(), None, "Aspirin".into(), None, daily_input("08:00"), 0)
                .unwrap();

        // Switching to one-off without a scheduled time is invalid and leaves it untouched
        let res = reminder.apply_update(ReminderUpdate {
            is_recurring: Some(false),
            ..Default::default()
        });
        assert_eq!(res.unwrap_err(), InvalidReminderError::MissingScheduledAt);
        assert!(reminder.is_recurring());

        reminder
            .apply_update(ReminderUpdate {
                is_recurring: Some(false),
                scheduled_at: Some(10_000),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(reminder.scheduled_at(), Some(10_000));
    }
}
