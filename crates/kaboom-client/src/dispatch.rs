use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

use kaboom_domain::{ActionCommand, CardKind};

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("transport channel closed")]
    TransportClosed,
}

/// The five remote operations the engine may invoke. Fire-and-forget:
/// acknowledgement only ever arrives as the next snapshot or an exception
/// event, never as a return value here.
#[async_trait]
pub trait ActionDispatcher: Send + Sync {
    async fn draw(&self) -> Result<(), DispatchError>;
    async fn play_action_card(&self, card: CardKind) -> Result<(), DispatchError>;
    async fn play_counter(&self) -> Result<(), DispatchError>;
    async fn give_favor_card(&self, card: CardKind) -> Result<(), DispatchError>;
    async fn resolve_defuse(&self, position: usize) -> Result<(), DispatchError>;

    async fn dispatch(&self, command: ActionCommand) -> Result<(), DispatchError> {
        match command {
            ActionCommand::Draw => self.draw().await,
            ActionCommand::PlayCard { card } => self.play_action_card(card).await,
            ActionCommand::PlayCounter => self.play_counter().await,
            ActionCommand::GiveFavorCard { card } => self.give_favor_card(card).await,
            ActionCommand::ResolveDefuse { position } => self.resolve_defuse(position).await,
        }
    }
}

/// Queues commands onto the transport task's channel.
#[derive(Debug, Clone)]
pub struct ChannelDispatcher {
    sender: mpsc::UnboundedSender<ActionCommand>,
}

impl ChannelDispatcher {
    #[must_use]
    pub fn new(sender: mpsc::UnboundedSender<ActionCommand>) -> Self {
        Self { sender }
    }

    #[must_use]
    pub fn pair() -> (Self, mpsc::UnboundedReceiver<ActionCommand>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self::new(sender), receiver)
    }

    fn send(&self, command: ActionCommand) -> Result<(), DispatchError> {
        self.sender
            .send(command)
            .map_err(|_| DispatchError::TransportClosed)
    }
}

#[async_trait]
impl ActionDispatcher for ChannelDispatcher {
    async fn draw(&self) -> Result<(), DispatchError> {
        self.send(ActionCommand::Draw)
    }

    async fn play_action_card(&self, card: CardKind) -> Result<(), DispatchError> {
        self.send(ActionCommand::PlayCard { card })
    }

    async fn play_counter(&self) -> Result<(), DispatchError> {
        self.send(ActionCommand::PlayCounter)
    }

    async fn give_favor_card(&self, card: CardKind) -> Result<(), DispatchError> {
        self.send(ActionCommand::GiveFavorCard { card })
    }

    async fn resolve_defuse(&self, position: usize) -> Result<(), DispatchError> {
        self.send(ActionCommand::ResolveDefuse { position })
    }
}
