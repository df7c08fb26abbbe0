//! Where questions get answered: in-process or by a running daemon.

use crate::cli::GlobalOpts;
use crate::client::RemoteClient;
use anyhow::{Context, Result};
use sohayok_common::api::ResolveResponse;
use sohayok_common::{
    ConversationLog, ConversationSession, IntentEngine, Message, RuleTable, SohayokConfig,
};
use tracing::debug;
use uuid::Uuid;

/// Rule table selected by the global options: --rules, then the config
pub fn load_local_table(opts: &GlobalOpts) -> Result<RuleTable> {
    if let Some(path) = &opts.rules {
        return RuleTable::load(path)
            .with_context(|| format!("Failed to load rules from {}", path.display()));
    }
    let (config, source) =
        SohayokConfig::load(opts.config.as_deref()).context("Failed to load configuration")?;
    debug!("Configuration: {}", source);
    config
        .load_rule_table()
        .context("Failed to load rule table")
}

pub enum Backend {
    Local(IntentEngine),
    Remote(RemoteClient),
}

impl Backend {
    pub fn from_options(opts: &GlobalOpts) -> Result<Self> {
        match &opts.remote {
            Some(url) => Ok(Backend::Remote(RemoteClient::new(url))),
            None => Ok(Backend::Local(IntentEngine::new(load_local_table(opts)?))),
        }
    }

    pub async fn explain(&self, text: &str) -> Result<ResolveResponse> {
        match self {
            Backend::Local(engine) => Ok(engine.explain(text).into()),
            Backend::Remote(client) => client.resolve(text).await,
        }
    }

    pub async fn open_chat(&self) -> Result<Chat> {
        match self {
            Backend::Local(engine) => Ok(Chat::Local(ConversationSession::new(engine.clone()))),
            Backend::Remote(client) => {
                let id = client.open_session().await?;
                Ok(Chat::Remote {
                    client: client.clone(),
                    id,
                })
            }
        }
    }
}

/// One conversation, local or held by the daemon
pub enum Chat {
    Local(ConversationSession),
    Remote { client: RemoteClient, id: Uuid },
}

impl Chat {
    pub async fn submit(&mut self, text: &str) -> Result<Message> {
        match self {
            Chat::Local(session) => Ok(session.submit(text)),
            Chat::Remote { client, id } => client.submit(*id, text).await,
        }
    }

    pub async fn log(&self) -> Result<ConversationLog> {
        match self {
            Chat::Local(session) => Ok(session.log().clone()),
            Chat::Remote { client, id } => client.log(*id).await,
        }
    }

    /// Discard the conversation
    pub async fn close(self) -> Result<()> {
        match self {
            Chat::Local(_) => Ok(()),
            Chat::Remote { client, id } => client.close_session(id).await,
        }
    }
}
