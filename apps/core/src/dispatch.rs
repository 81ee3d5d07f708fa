use std::fmt::{Display, Formatter};

use crate::contract::ActionRequest;
use crate::model::{Command, Invocation, ViewCommand};
use crate::ports::{ActionPort, NavigatorPort, PortError};
use crate::selector::SearchMode;
use crate::usage::UsageRanker;

/// How a command was executed. `View` keeps the palette open so
/// multi-step keyword flows can continue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Executed {
    Action,
    Navigation,
    View,
    Noop,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecuteError {
    Action(PortError),
    Navigation(PortError),
}

impl Display for ExecuteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Action(error) | Self::Navigation(error) => write!(f, "{error}"),
        }
    }
}

impl std::error::Error for ExecuteError {}

pub struct DispatchContext<'a> {
    /// Free-text query at the moment of execution, fed to deferred
    /// payloads.
    pub query: String,
    pub input: &'a mut String,
    pub mode: &'a mut Option<SearchMode>,
    pub usage: &'a UsageRanker,
    pub actions: &'a dyn ActionPort,
    pub navigator: &'a dyn NavigatorPort,
}

/// Routes a selected command to its execution target. Usage is recorded
/// before dispatch, unconditionally. Precedence: action, then url
/// navigation, then view command; anything else is a logged no-op.
pub fn execute(command: &Command, ctx: DispatchContext<'_>) -> Result<Executed, ExecuteError> {
    if let Err(error) = ctx.usage.record(&command.title) {
        crate::logging::warn(&format!("usage record failed: {error}"));
    }

    match &command.invocation {
        Invocation::Action(action) => {
            let request = ActionRequest {
                id: action.id.clone(),
                payload: action.payload.resolve(&ctx.query),
            };
            ctx.actions
                .run_action(request)
                .map_err(ExecuteError::Action)?;
            *ctx.mode = None;
            Ok(Executed::Action)
        }
        Invocation::None => match &command.url {
            Some(url) => {
                ctx.navigator
                    .open_url(url)
                    .map_err(ExecuteError::Navigation)?;
                *ctx.mode = None;
                Ok(Executed::Navigation)
            }
            None => {
                crate::logging::warn(&format!(
                    "command \"{}\" has no action, url or view effect",
                    command.title
                ));
                Ok(Executed::Noop)
            }
        },
        Invocation::View(view) => {
            match view {
                ViewCommand::EnterMode(mode) => {
                    // Clear the input first so leaving the previous mode
                    // is not mistaken for typing.
                    ctx.input.clear();
                    *ctx.mode = Some(*mode);
                }
                ViewCommand::ClearUsageHistory => {
                    if let Err(error) = ctx.usage.reset() {
                        crate::logging::warn(&format!("usage reset failed: {error}"));
                    }
                }
            }
            Ok(Executed::View)
        }
    }
}
