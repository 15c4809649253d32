// src/logic/timer.rs
//! 「〇秒後にこれを 1 回だけ実行して」を実現するフレーム駆動のタイマー。
//! 名前の文字列でメソッドを呼ぶんじゃなくて、クロージャをそのまま預かるよ。

use log::{debug, warn};

/// 予約されたアクション。1 回だけ呼ばれる。
pub type ScheduledAction = Box<dyn FnOnce() + Send + 'static>;

/// 遅延実行の窓口。お皿が完成した時のシーン遷移予約に使うよ。
pub trait Timer {
    /// `delay` 秒後 (以降の最初の `advance`) に `action` を 1 回だけ実行する。
    /// キャンセルはできない。
    fn schedule_once(&mut self, delay: f32, action: ScheduledAction);
}

struct PendingAction {
    due: f64,
    sequence: u64,
    action: ScheduledAction,
}

/// ホストのフレームループが毎フレーム `advance(dt)` して進めるタイマー。
///
/// 予約したフレームの中では絶対に実行されず、必ず後の `advance` で実行される。
/// 同じ時刻のアクションは予約した順番で実行するよ。
#[derive(Default)]
pub struct FrameTimer {
    now: f64,
    next_sequence: u64,
    pending: Vec<PendingAction>,
}

impl FrameTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 時間を `delta_time` 秒進めて、期限が来たアクションを実行する。実行した数を返す。
    pub fn advance(&mut self, delta_time: f32) -> usize {
        if delta_time.is_finite() && delta_time > 0.0 {
            self.now += delta_time as f64;
        }

        let now = self.now;
        let (mut due, waiting): (Vec<PendingAction>, Vec<PendingAction>) =
            std::mem::take(&mut self.pending)
                .into_iter()
                .partition(|p| p.due <= now);
        self.pending = waiting;

        due.sort_by(|a, b| {
            a.due
                .total_cmp(&b.due)
                .then(a.sequence.cmp(&b.sequence))
        });
        let fired = due.len();
        for pending in due {
            debug!("FrameTimer: firing action #{} (due {:.3}s)", pending.sequence, pending.due);
            (pending.action)();
        }
        fired
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn elapsed(&self) -> f64 {
        self.now
    }
}

impl Timer for FrameTimer {
    fn schedule_once(&mut self, delay: f32, action: ScheduledAction) {
        let delay = if delay.is_finite() && delay >= 0.0 {
            delay
        } else {
            warn!("FrameTimer: invalid delay {}, running on the next tick", delay);
            0.0
        };
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.pending.push(PendingAction {
            due: self.now + delay as f64,
            sequence,
            action,
        });
        debug!("FrameTimer: scheduled action #{} in {:.3}s", sequence, delay);
    }
}

impl std::fmt::Debug for FrameTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameTimer")
            .field("now", &self.now)
            .field("pending", &self.pending.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn recorder() -> (Arc<Mutex<Vec<&'static str>>>, impl Fn(&'static str) -> ScheduledAction) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let log_for_make = Arc::clone(&log);
        let make = move |name: &'static str| -> ScheduledAction {
            let log = Arc::clone(&log_for_make);
            Box::new(move || log.lock().unwrap().push(name))
        };
        (log, make)
    }

    #[test]
    fn fires_only_after_delay_elapsed() {
        let (log, make) = recorder();
        let mut timer = FrameTimer::new();
        timer.schedule_once(1.0, make("done"));

        assert_eq!(timer.advance(0.5), 0);
        assert_eq!(timer.advance(0.4), 0);
        assert!(log.lock().unwrap().is_empty());
        assert_eq!(timer.advance(0.1), 1);
        assert_eq!(*log.lock().unwrap(), vec!["done"]);
        assert_eq!(timer.pending_count(), 0);
    }

    #[test]
    fn action_fires_exactly_once() {
        let (log, make) = recorder();
        let mut timer = FrameTimer::new();
        timer.schedule_once(0.2, make("once"));
        timer.advance(1.0);
        timer.advance(1.0);
        assert_eq!(log.lock().unwrap().len(), 1);
    }

    #[test]
    fn zero_delay_waits_for_the_next_tick() {
        let (log, make) = recorder();
        let mut timer = FrameTimer::new();
        timer.schedule_once(0.0, make("next"));
        assert!(log.lock().unwrap().is_empty(), "予約した瞬間には実行しない");
        timer.advance(0.0);
        assert_eq!(*log.lock().unwrap(), vec!["next"]);
    }

    #[test]
    fn due_actions_run_in_due_then_schedule_order() {
        let (log, make) = recorder();
        let mut timer = FrameTimer::new();
        timer.schedule_once(0.3, make("late"));
        timer.schedule_once(0.1, make("early-a"));
        timer.schedule_once(0.1, make("early-b"));
        timer.advance(1.0);
        assert_eq!(*log.lock().unwrap(), vec!["early-a", "early-b", "late"]);
    }

    #[test]
    fn invalid_delay_is_treated_as_zero() {
        let (log, make) = recorder();
        let mut timer = FrameTimer::new();
        timer.schedule_once(f32::NAN, make("nan"));
        timer.schedule_once(-2.0, make("negative"));
        timer.advance(0.016);
        assert_eq!(log.lock().unwrap().len(), 2);
    }

    #[test]
    fn invalid_delta_does_not_move_time() {
        let mut timer = FrameTimer::new();
        timer.advance(f32::NAN);
        timer.advance(-1.0);
        assert_eq!(timer.elapsed(), 0.0);
        timer.advance(0.5);
        assert!((timer.elapsed() - 0.5).abs() < 1e-9);
    }
}
