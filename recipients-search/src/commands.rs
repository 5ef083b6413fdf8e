//! Command line commands.
//!
//! Each command maps to one service operation and renders its result as JSON.

use clap::{Parser, Subcommand};
use recipients_repository::{
    validate_conditions, DeleteOutcome, FindRecipientRequest, RecipientSearchService,
};
use recipients_shared::{Condition, Pagination, SearchParams, DEFAULT_PAGE_SIZE};
use serde_json::{json, Value};
use tracing::info;

use crate::AppError;

#[derive(Parser, Debug)]
#[clap(name = "recipients-search", version)]
#[clap(about = "Search and maintain list recipients in OpenSearch")]
pub struct Cli {
    #[clap(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Fetch one recipient of a list
    Find { list_id: String, recipient_id: String },

    /// Store a recipient given as JSON
    Create { recipient: String },

    /// Replace a recipient given as JSON
    Update { recipient: String },

    /// Delete a recipient by document id (`<listId>_<recipientId>`)
    Remove { document_id: String },

    /// Search with JSON params (`q`, `status`, `listId`, `from`, `size`)
    Search { params: String },

    /// Match the recipients of a list against a JSON condition list
    Segment {
        list_id: String,
        conditions: String,
        #[clap(default_value_t = 0)]
        from: usize,
        #[clap(default_value_t = DEFAULT_PAGE_SIZE)]
        size: usize,
    },

    /// List recipients that bounced, complained or unsubscribed
    Undeliverable {
        list_id: String,
        #[clap(default_value_t = 0)]
        from: usize,
        #[clap(default_value_t = DEFAULT_PAGE_SIZE)]
        size: usize,
    },
}

/// A command with its JSON arguments decoded.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Find(FindRecipientRequest),
    /// Recipient documents stay raw JSON until the service validates them.
    Create(Value),
    Update(Value),
    Remove(String),
    Search(SearchParams),
    Segment {
        list_id: String,
        conditions: Vec<Condition>,
        pagination: Pagination,
    },
    Undeliverable {
        list_id: String,
        pagination: Pagination,
    },
}

impl TryFrom<CliCommand> for Command {
    type Error = AppError;

    /// Condition lists are validated here, so a malformed segment never opens a
    /// connection.
    fn try_from(command: CliCommand) -> Result<Self, AppError> {
        Ok(match command {
            CliCommand::Find {
                list_id,
                recipient_id,
            } => Self::Find(FindRecipientRequest::new(list_id, recipient_id)),
            CliCommand::Create { recipient } => Self::Create(parse_json(&recipient, "recipient")?),
            CliCommand::Update { recipient } => Self::Update(parse_json(&recipient, "recipient")?),
            CliCommand::Remove { document_id } => Self::Remove(document_id),
            CliCommand::Search { params } => Self::Search(parse_json(&params, "search params")?),
            CliCommand::Segment {
                list_id,
                conditions,
                from,
                size,
            } => {
                let raw: Value = parse_json(&conditions, "conditions")?;
                Self::Segment {
                    list_id,
                    conditions: validate_conditions(&raw)?,
                    pagination: Pagination::new(from, size),
                }
            }
            CliCommand::Undeliverable {
                list_id,
                from,
                size,
            } => Self::Undeliverable {
                list_id,
                pagination: Pagination::new(from, size),
            },
        })
    }
}

impl Command {
    /// Parse a full command line, program name included.
    pub fn parse_from<I, T>(args: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli = Cli::try_parse_from(args).map_err(|e| AppError::usage(e.to_string()))?;
        Self::try_from(cli.command)
    }

    /// Run the command and return its JSON output.
    pub async fn execute(&self, service: &RecipientSearchService) -> Result<Value, AppError> {
        let output = match self {
            Self::Find(request) => service.find(request).await?,
            Self::Create(recipient) => service.create(recipient).await?,
            Self::Update(recipient) => service.update(recipient).await?,
            Self::Remove(id) => {
                let outcome = service.remove(id).await?;
                json!({
                    "id": id,
                    "result": match outcome {
                        DeleteOutcome::Deleted => "deleted",
                        DeleteOutcome::AlreadyAbsent => "already_absent",
                    }
                })
            }
            Self::Search(params) => serde_json::to_value(service.search(params).await?)?,
            Self::Segment {
                list_id,
                conditions,
                pagination,
            } => serde_json::to_value(
                service
                    .search_by_list_and_conditions(list_id, conditions, *pagination)
                    .await?,
            )?,
            Self::Undeliverable {
                list_id,
                pagination,
            } => serde_json::to_value(
                service
                    .undeliverable_recipients(list_id, *pagination)
                    .await?,
            )?,
        };

        info!(command = self.name(), "Command completed");
        Ok(output)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Find(_) => "find",
            Self::Create(_) => "create",
            Self::Update(_) => "update",
            Self::Remove(_) => "remove",
            Self::Search(_) => "search",
            Self::Segment { .. } => "segment",
            Self::Undeliverable { .. } => "undeliverable",
        }
    }
}

fn parse_json<T: serde::de::DeserializeOwned>(raw: &str, what: &str) -> Result<T, AppError> {
    serde_json::from_str(raw).map_err(|e| AppError::usage(format!("invalid {}: {}", what, e)))
}
