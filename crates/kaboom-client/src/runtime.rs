use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use kaboom_autopilot::{Autopilot, AutoplayPolicies, IdleCountdown, PolicyUpdate, TurnView};
use kaboom_domain::{ActionCommand, PlayerId, SessionSnapshot};

use crate::config::ClientConfig;
use crate::dispatch::ActionDispatcher;

/// Inbox of the autopilot actor. Snapshots and exceptions come from the
/// transport layer, the rest from the user-facing controls.
#[derive(Debug)]
pub enum AutopilotMsg {
    Snapshot(SessionSnapshot),
    Exception { message: String },
    SetPolicies(PolicyUpdate),
    StopAutoplay,
    ResetTimer,
    GetPolicies { reply: oneshot::Sender<PolicyReadout> },
    GetTimer { reply: oneshot::Sender<TimerReadout> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolicyReadout {
    pub policies: AutoplayPolicies,
    pub all_enabled: bool,
    /// True while the current enable-all came from the idle timer rather
    /// than the user.
    pub idle_escalated: bool,
}

/// UI-facing projection of the idle timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerReadout {
    pub seconds_remaining: u32,
    pub is_active: bool,
    pub is_running: bool,
}

#[derive(Debug, Clone)]
pub struct AutopilotConfig {
    pub idle_timeout_secs: u32,
    pub tick_interval: Duration,
}

impl From<&ClientConfig> for AutopilotConfig {
    fn from(config: &ClientConfig) -> Self {
        Self {
            idle_timeout_secs: config.idle_timeout_secs,
            tick_interval: Duration::from_millis(config.tick_interval_ms),
        }
    }
}

#[derive(Debug, Error)]
#[error("autopilot task unavailable")]
pub struct AutopilotUnavailable;

#[derive(Debug, Clone)]
pub struct AutopilotHandle {
    sender: mpsc::Sender<AutopilotMsg>,
}

impl AutopilotHandle {
    pub async fn snapshot(&self, snapshot: SessionSnapshot) -> Result<(), AutopilotUnavailable> {
        self.send(AutopilotMsg::Snapshot(snapshot)).await
    }

    pub async fn exception(&self, message: impl Into<String>) -> Result<(), AutopilotUnavailable> {
        self.send(AutopilotMsg::Exception {
            message: message.into(),
        })
        .await
    }

    pub async fn set_policies(&self, update: PolicyUpdate) -> Result<(), AutopilotUnavailable> {
        self.send(AutopilotMsg::SetPolicies(update)).await
    }

    /// The combined "all policies" setter.
    pub async fn set_all_policies(&self, enabled: bool) -> Result<(), AutopilotUnavailable> {
        self.set_policies(PolicyUpdate::set_all(enabled)).await
    }

    /// Disables every policy and restarts the idle countdown from full.
    pub async fn stop_autoplay(&self) -> Result<(), AutopilotUnavailable> {
        self.send(AutopilotMsg::StopAutoplay).await
    }

    pub async fn reset_timer(&self) -> Result<(), AutopilotUnavailable> {
        self.send(AutopilotMsg::ResetTimer).await
    }

    pub async fn policies(&self) -> Result<PolicyReadout, AutopilotUnavailable> {
        let (tx, rx) = oneshot::channel();
        self.send(AutopilotMsg::GetPolicies { reply: tx }).await?;
        rx.await.map_err(|_| AutopilotUnavailable)
    }

    pub async fn timer(&self) -> Result<TimerReadout, AutopilotUnavailable> {
        let (tx, rx) = oneshot::channel();
        self.send(AutopilotMsg::GetTimer { reply: tx }).await?;
        rx.await.map_err(|_| AutopilotUnavailable)
    }

    async fn send(&self, msg: AutopilotMsg) -> Result<(), AutopilotUnavailable> {
        self.sender.send(msg).await.map_err(|_| AutopilotUnavailable)
    }
}

/// Spawn the autopilot actor for one room. The task ends when every
/// handle is dropped; dropping it cancels the ticker with it.
pub fn spawn_autopilot(
    me: PlayerId,
    config: AutopilotConfig,
    dispatcher: Arc<dyn ActionDispatcher>,
) -> AutopilotHandle {
    let (sender, inbox) = mpsc::channel(64);
    tokio::spawn(run_autopilot(me, config, dispatcher, inbox));
    AutopilotHandle { sender }
}

struct AutopilotTask {
    me: PlayerId,
    autopilot: Autopilot,
    countdown: IdleCountdown,
    escalation_enabled: bool,
    idle_escalated: bool,
    latest: Option<SessionSnapshot>,
    was_counting: bool,
    dispatcher: Arc<dyn ActionDispatcher>,
}

async fn run_autopilot(
    me: PlayerId,
    config: AutopilotConfig,
    dispatcher: Arc<dyn ActionDispatcher>,
    mut inbox: mpsc::Receiver<AutopilotMsg>,
) {
    let mut task = AutopilotTask {
        me,
        autopilot: Autopilot::new(me),
        countdown: IdleCountdown::new(config.idle_timeout_secs),
        escalation_enabled: config.idle_timeout_secs > 0,
        idle_escalated: false,
        latest: None,
        was_counting: false,
        dispatcher,
    };
    let mut ticker = tokio::time::interval(config.tick_interval);

    loop {
        tokio::select! {
            maybe = inbox.recv() => {
                let Some(msg) = maybe else { break };
                task.handle_msg(msg).await;
            }
            _ = ticker.tick() => {
                task.handle_tick().await;
            }
        }
    }
    debug!("autopilot task shut down");
}

impl AutopilotTask {
    async fn handle_msg(&mut self, msg: AutopilotMsg) {
        match msg {
            AutopilotMsg::Snapshot(snapshot) => {
                self.update_countdown_edges(&snapshot);
                let command = self.autopilot.observe(&snapshot);
                self.latest = Some(snapshot);
                self.dispatch(command).await;
            }
            AutopilotMsg::Exception { message } => {
                warn!(error = %message, "transport rejected an action");
                self.autopilot.on_exception();
                self.reevaluate_latest().await;
            }
            AutopilotMsg::SetPolicies(update) => {
                self.autopilot.apply_policies(update);
                self.reevaluate_latest().await;
            }
            AutopilotMsg::StopAutoplay => {
                self.autopilot.apply_policies(PolicyUpdate::disable_all());
                self.countdown.reset();
                self.idle_escalated = false;
                info!("autoplay stopped");
            }
            AutopilotMsg::ResetTimer => {
                self.countdown.reset();
            }
            AutopilotMsg::GetPolicies { reply } => {
                let policies = self.autopilot.policies();
                let _ = reply.send(PolicyReadout {
                    policies,
                    all_enabled: policies.all_enabled(),
                    idle_escalated: self.idle_escalated,
                });
            }
            AutopilotMsg::GetTimer { reply } => {
                let _ = reply.send(self.timer_readout());
            }
        }
    }

    async fn handle_tick(&mut self) {
        let Some(snapshot) = self.latest.clone() else {
            return;
        };
        let view = self.update_countdown_edges(&snapshot);
        if self.escalation_enabled && view.is_my_turn && view.can_act && self.countdown.tick() {
            info!("idle timeout reached, enabling every autoplay policy");
            self.idle_escalated = true;
            self.autopilot.apply_policies(PolicyUpdate::enable_all());
        }
        let command = self.autopilot.reevaluate(&snapshot);
        self.dispatch(command).await;
    }

    /// The countdown reloads on the rising edge of "escalation is on and
    /// the turn just became mine"; a falling edge merely stops the ticks
    /// (cancellation, not pause).
    fn update_countdown_edges(&mut self, snapshot: &SessionSnapshot) -> TurnView {
        let view = TurnView::derive(snapshot, self.me);
        let counting = self.escalation_enabled && view.is_my_turn;
        if counting && !self.was_counting {
            self.countdown.reset();
        }
        self.was_counting = counting;
        view
    }

    fn timer_readout(&self) -> TimerReadout {
        let view = self
            .latest
            .as_ref()
            .map(|snapshot| TurnView::derive(snapshot, self.me))
            .unwrap_or_default();
        let is_active = self.escalation_enabled && view.is_my_turn;
        TimerReadout {
            seconds_remaining: self.countdown.remaining_secs(),
            is_active,
            is_running: is_active && view.can_act,
        }
    }

    async fn dispatch(&mut self, command: Option<ActionCommand>) {
        let Some(command) = command else { return };
        if let Err(err) = self.dispatcher.dispatch(command).await {
            warn!(error = %err, command = command.name(), "dispatch failed");
            self.autopilot.on_exception();
        }
    }

    async fn reevaluate_latest(&mut self) {
        let Some(snapshot) = self.latest.clone() else {
            return;
        };
        let command = self.autopilot.reevaluate(&snapshot);
        self.dispatch(command).await;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use kaboom_domain::{CardKind, PendingFavor, RoomId};

    use crate::dispatch::DispatchError;

    use super::*;

    #[derive(Debug, Default)]
    struct RecordingDispatcher {
        calls: Mutex<Vec<ActionCommand>>,
        fail: bool,
    }

    impl RecordingDispatcher {
        fn failing() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail: true,
            }
        }

        fn calls(&self) -> Vec<ActionCommand> {
            self.calls.lock().expect("lock").clone()
        }

        fn record(&self, command: ActionCommand) -> Result<(), DispatchError> {
            self.calls.lock().expect("lock").push(command);
            if self.fail {
                return Err(DispatchError::TransportClosed);
            }
            Ok(())
        }
    }

    #[async_trait]
    impl ActionDispatcher for RecordingDispatcher {
        async fn draw(&self) -> Result<(), DispatchError> {
            self.record(ActionCommand::Draw)
        }

        async fn play_action_card(&self, card: CardKind) -> Result<(), DispatchError> {
            self.record(ActionCommand::PlayCard { card })
        }

        async fn play_counter(&self) -> Result<(), DispatchError> {
            self.record(ActionCommand::PlayCounter)
        }

        async fn give_favor_card(&self, card: CardKind) -> Result<(), DispatchError> {
            self.record(ActionCommand::GiveFavorCard { card })
        }

        async fn resolve_defuse(&self, position: usize) -> Result<(), DispatchError> {
            self.record(ActionCommand::ResolveDefuse { position })
        }
    }

    fn my_turn_snapshot(me: PlayerId, other: PlayerId) -> SessionSnapshot {
        SessionSnapshot {
            room_id: RoomId::new(),
            player_order: vec![me, other],
            current_turn_index: 0,
            hands: BTreeMap::from([(me, Vec::new())]),
            pending_action: None,
            pending_favor: None,
            pending_defuse: None,
            deck_size: 8,
            logs: Vec::new(),
        }
    }

    fn slow_config() -> AutopilotConfig {
        AutopilotConfig {
            idle_timeout_secs: 0,
            tick_interval: Duration::from_secs(60),
        }
    }

    #[tokio::test]
    async fn redelivered_snapshots_produce_a_single_draw() {
        let me = PlayerId::new();
        let other = PlayerId::new();
        let dispatcher = Arc::new(RecordingDispatcher::default());
        let handle = spawn_autopilot(me, slow_config(), dispatcher.clone());

        handle
            .set_policies(PolicyUpdate {
                draw: Some(true),
                ..PolicyUpdate::default()
            })
            .await
            .expect("set policies");
        let snapshot = my_turn_snapshot(me, other);
        for _ in 0..3 {
            handle.snapshot(snapshot.clone()).await.expect("snapshot");
        }
        // Queries drain behind the snapshots, so the reply doubles as a sync point.
        let _ = handle.policies().await.expect("policies");

        assert_eq!(dispatcher.calls(), vec![ActionCommand::Draw]);
    }

    #[tokio::test]
    async fn favor_interrupt_is_served_on_anyones_turn() {
        let me = PlayerId::new();
        let other = PlayerId::new();
        let dispatcher = Arc::new(RecordingDispatcher::default());
        let handle = spawn_autopilot(me, slow_config(), dispatcher.clone());

        handle
            .set_policies(PolicyUpdate {
                give_favor: Some(true),
                ..PolicyUpdate::default()
            })
            .await
            .expect("set policies");
        let mut snapshot = my_turn_snapshot(me, other);
        snapshot.current_turn_index = 1;
        snapshot
            .hands
            .insert(me, vec![CardKind::Neutralizer, CardKind::CollectionAlpha]);
        snapshot.pending_favor = Some(PendingFavor {
            requested_by: other,
            target: me,
        });
        handle.snapshot(snapshot).await.expect("snapshot");
        let _ = handle.policies().await.expect("policies");

        assert_eq!(
            dispatcher.calls(),
            vec![ActionCommand::GiveFavorCard {
                card: CardKind::CollectionAlpha
            }]
        );
    }

    #[tokio::test]
    async fn idle_timeout_escalates_to_all_policies_exactly_once() {
        let me = PlayerId::new();
        let other = PlayerId::new();
        let dispatcher = Arc::new(RecordingDispatcher::default());
        let handle = spawn_autopilot(
            me,
            AutopilotConfig {
                idle_timeout_secs: 5,
                tick_interval: Duration::from_millis(10),
            },
            dispatcher.clone(),
        );

        handle
            .snapshot(my_turn_snapshot(me, other))
            .await
            .expect("snapshot");
        tokio::time::sleep(Duration::from_millis(300)).await;

        let readout = handle.policies().await.expect("policies");
        assert!(readout.all_enabled);
        assert!(readout.idle_escalated);
        // Draw fired once when escalation hit; nothing repeats afterwards.
        assert_eq!(dispatcher.calls(), vec![ActionCommand::Draw]);

        let timer = handle.timer().await.expect("timer");
        assert_eq!(timer.seconds_remaining, 0);
        assert!(timer.is_active);
    }

    #[tokio::test]
    async fn stop_autoplay_disables_everything_and_reloads_the_timer() {
        let me = PlayerId::new();
        let other = PlayerId::new();
        let dispatcher = Arc::new(RecordingDispatcher::default());
        let handle = spawn_autopilot(
            me,
            AutopilotConfig {
                idle_timeout_secs: 30,
                tick_interval: Duration::from_secs(60),
            },
            dispatcher.clone(),
        );

        handle.set_all_policies(true).await.expect("enable all");
        let readout = handle.policies().await.expect("policies");
        assert!(readout.all_enabled);
        assert!(!readout.idle_escalated);

        handle
            .snapshot(my_turn_snapshot(me, other))
            .await
            .expect("snapshot");
        handle.stop_autoplay().await.expect("stop");

        let readout = handle.policies().await.expect("policies");
        assert_eq!(readout.policies, AutoplayPolicies::default());
        assert!(!readout.all_enabled);

        let timer = handle.timer().await.expect("timer");
        assert_eq!(timer.seconds_remaining, 30);
        assert!(timer.is_active);
        assert!(timer.is_running);
    }

    #[tokio::test]
    async fn failed_dispatch_does_not_kill_the_task() {
        let me = PlayerId::new();
        let other = PlayerId::new();
        let dispatcher = Arc::new(RecordingDispatcher::failing());
        let handle = spawn_autopilot(me, slow_config(), dispatcher.clone());

        handle
            .set_policies(PolicyUpdate {
                draw: Some(true),
                ..PolicyUpdate::default()
            })
            .await
            .expect("set policies");
        let mut snapshot = my_turn_snapshot(me, other);
        handle.snapshot(snapshot.clone()).await.expect("snapshot");

        // Turn cycles away and back: a fresh window retries the draw even
        // though the first dispatch failed.
        snapshot.current_turn_index = 1;
        handle.snapshot(snapshot.clone()).await.expect("snapshot");
        snapshot.current_turn_index = 0;
        handle.snapshot(snapshot).await.expect("snapshot");
        let _ = handle.policies().await.expect("policies");

        assert_eq!(
            dispatcher.calls(),
            vec![ActionCommand::Draw, ActionCommand::Draw]
        );
    }

    #[tokio::test]
    async fn timer_readout_tracks_turn_ownership() {
        let me = PlayerId::new();
        let other = PlayerId::new();
        let dispatcher = Arc::new(RecordingDispatcher::default());
        let handle = spawn_autopilot(
            me,
            AutopilotConfig {
                idle_timeout_secs: 10,
                tick_interval: Duration::from_secs(60),
            },
            dispatcher.clone(),
        );

        let timer = handle.timer().await.expect("timer");
        assert!(!timer.is_active);
        assert!(!timer.is_running);

        let mut snapshot = my_turn_snapshot(me, other);
        handle.snapshot(snapshot.clone()).await.expect("snapshot");
        let timer = handle.timer().await.expect("timer");
        assert!(timer.is_active);
        assert!(timer.is_running);
        assert_eq!(timer.seconds_remaining, 10);

        snapshot.current_turn_index = 1;
        handle.snapshot(snapshot).await.expect("snapshot");
        let timer = handle.timer().await.expect("timer");
        assert!(!timer.is_active);
        assert!(!timer.is_running);
    }
}
