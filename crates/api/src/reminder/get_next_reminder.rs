use crate::{
    error::MediError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use medi_reminder_api_structs::get_next_reminder::*;
use medi_reminder_domain::{next_occurrence, Reminder, ID};
use medi_reminder_infra::MediContext;

pub async fn get_next_reminder_controller(
    http_req: HttpRequest,
    ctx: web::Data<MediContext>,
) -> Result<HttpResponse, MediError> {
    let user_id = protect_route(&http_req, &ctx)?;

    let usecase = GetNextReminderUseCase { user_id };

    execute(usecase, &ctx)
        .await
        .map(|next| HttpResponse::Ok().json(APIResponse::new(next)))
        .map_err(|_| MediError::InternalError)
}

/// Finds the upcoming dose: the earliest next occurrence among all the
/// reminders of the user
#[derive(Debug)]
pub struct GetNextReminderUseCase {
    pub user_id: ID,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetNextReminderUseCase {
    type Response = Option<(Reminder, i64)>;

    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &MediContext) -> Result<Self::Response, Self::Errors> {
        let reminders = ctx
            .repos
            .reminders
            .find_by_user(&self.user_id)
            .await
            .map_err(|_| UseCaseErrors::StorageError)?;

        let now = ctx.sys.get_timestamp_millis();
        Ok(reminders
            .into_iter()
            .filter_map(|reminder| {
                next_occurrence(&reminder, now, &ctx.config.timezone).map(|next| (reminder, next))
            })
            .min_by_key(|(_, next)| *next))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::testing::setup_context;
    use medi_reminder_domain::{RecurrenceType, ReminderScheduleInput};

    // 2021-03-01T12:00:00Z
    const NOW: i64 = 1_614_600_000_000;
    const HOUR: i64 = 1000 * 60 * 60;

    #[actix_web::test]
    async fn finds_earliest_upcoming_occurrence() {
        let (ctx, _) = setup_context(NOW);
        let user_id = ID::default();
        let one_off = |scheduled_at: i64| {
            Reminder::new(
                user_id.clone(),
                None,
                "Aspirin".into(),
                None,
                ReminderScheduleInput {
                    scheduled_at: Some(scheduled_at),
                    ..Default::default()
                },
                NOW - HOUR,
            )
            .unwrap()
        };
        let past = one_off(NOW - HOUR);
        let far = one_off(NOW + 24 * HOUR);
        // 20:00 today
        let evening = Reminder::new(
            user_id.clone(),
            None,
            "Vitamin D".into(),
            None,
            ReminderScheduleInput {
                is_recurring: true,
                recurrence_type: Some(RecurrenceType::Daily),
                time: Some("20:00".into()),
                ..Default::default()
            },
            NOW - HOUR,
        )
        .unwrap();
        for reminder in [&past, &far, &evening] {
            ctx.repos.reminders.insert(reminder).await.unwrap();
        }

        let mut usecase = GetNextReminderUseCase {
            user_id: user_id.clone(),
        };
        let (reminder, next) = usecase.execute(&ctx).await.unwrap().expect("Upcoming dose");
        assert_eq!(reminder.id, evening.id);
        assert_eq!(next, NOW + 8 * HOUR);

        let mut usecase = GetNextReminderUseCase {
            user_id: ID::default(),
        };
        assert!(usecase.execute(&ctx).await.unwrap().is_none());
    }
}
