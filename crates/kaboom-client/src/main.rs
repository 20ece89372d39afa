use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::Result;
use kaboom_autopilot::PolicyUpdate;
use kaboom_client::{spawn_autopilot, AutopilotConfig, ChannelDispatcher, ClientConfig};
use kaboom_domain::{CardKind, PlayerId, RoomId, SessionSnapshot};
use observability::init_tracing;
use tracing::info;

/// Bootstrap demo: wires the autopilot to a channel dispatcher, feeds it a
/// fabricated two-player snapshot, and logs whatever the engine decides.
/// Real deployments replace both ends with the websocket transport.
#[tokio::main]
async fn main() -> Result<()> {
    let config = ClientConfig::load()?;
    init_tracing("kaboom-client", &config.log_filter);

    let me = PlayerId::new();
    let opponent = PlayerId::new();
    let (dispatcher, mut outbound) = ChannelDispatcher::pair();
    let handle = spawn_autopilot(me, AutopilotConfig::from(&config), Arc::new(dispatcher));

    handle
        .set_policies(PolicyUpdate {
            draw: Some(true),
            skip: Some(true),
            ..PolicyUpdate::default()
        })
        .await?;
    handle
        .snapshot(SessionSnapshot {
            room_id: RoomId::new(),
            player_order: vec![me, opponent],
            current_turn_index: 0,
            hands: BTreeMap::from([(me, vec![CardKind::Skip, CardKind::CollectionAlpha])]),
            pending_action: None,
            pending_favor: None,
            pending_defuse: None,
            deck_size: 24,
            logs: Vec::new(),
        })
        .await?;

    let command = outbound.recv().await;
    let timer = handle.timer().await?;
    info!(
        command = ?command,
        seconds_remaining = timer.seconds_remaining,
        timer_running = timer.is_running,
        "autopilot bootstrap complete"
    );
    Ok(())
}
