use crate::{reminder::send_reminders::SendRemindersUseCase, shared::usecase::execute};
use actix_web::rt::time::{interval, sleep_until, Instant};
use masterclass_mailer_infra::MailerContext;
use std::time::Duration;
use tracing::info;

pub fn get_start_delay(now_ts: usize, secs_before_min: usize) -> usize {
    let secs_to_next_minute = 60 - (now_ts / 1000) % 60;
    if secs_to_next_minute > secs_before_min {
        secs_to_next_minute - secs_before_min
    } else {
        secs_to_next_minute + (60 - secs_before_min)
    }
}

/// Runs the reminder sweep at the configured interval, starting at the next
/// whole minute. Does nothing when no interval is configured.
pub fn start_send_reminders_job(ctx: MailerContext) {
    let sweep_interval = match ctx.config.reminder_sweep_interval {
        Some(sweep_interval) => sweep_interval,
        None => return,
    };

    actix_web::rt::spawn(async move {
        let now = ctx.sys.get_timestamp_millis();
        let secs_to_next_run = get_start_delay(now as usize, 0);
        let start = Instant::now() + Duration::from_secs(secs_to_next_run as u64);

        sleep_until(start).await;
        let mut sweep_interval = interval(sweep_interval);
        loop {
            sweep_interval.tick().await;
            if let Ok(report) = execute(SendRemindersUseCase {}, &ctx).await {
                info!(
                    "Scheduled reminder sweep done: {} day before, {} two hours before, {} errors, {} skipped",
                    report.sent_24h, report.sent_2h, report.errors, report.skipped
                );
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_delay_works() {
        assert_eq!(get_start_delay(50 * 1000, 5), 5);
        assert_eq!(get_start_delay(50 * 1000, 10), 60);
        assert_eq!(get_start_delay(50 * 1000, 15), 55);
        assert_eq!(get_start_delay(60 * 1000, 60), 60);
        assert_eq!(get_start_delay(60 * 1000, 10), 50);
        assert_eq!(get_start_delay(59 * 1000, 0), 1);
        assert_eq!(get_start_delay(59 * 1000, 1), 60);
    }
}
