//! Service - command handler registry and dispatch.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::{debug, info_span, warn};

use super::context::Context;
use super::error::ServiceError;
use crate::session::Session;

type Guard<A> = Box<dyn Fn(&Context<'_, A>) -> bool + Send + Sync>;
type Handle<A> = Box<dyn Fn(&mut Context<'_, A>) -> Result<Value, ServiceError> + Send + Sync>;

/// A registered command handler with optional guard.
struct CommandHandler<A> {
    guard: Option<Guard<A>>,
    handle: Handle<A>,
}

/// Routes named commands to handler functions.
///
/// Generic over `A`, the application state. Handlers receive a `Context<A>`
/// and reach the state via `ctx.app()`.
pub struct Service<A> {
    app: A,
    handlers: BTreeMap<String, CommandHandler<A>>,
}

impl<A: Send + Sync + 'static> Service<A> {
    pub fn new(app: A) -> Self {
        Self {
            app,
            handlers: BTreeMap::new(),
        }
    }

    /// Register a command handler. Builder style.
    pub fn command<F>(mut self, name: &str, handler: F) -> Self
    where
        F: Fn(&mut Context<'_, A>) -> Result<Value, ServiceError> + Send + Sync + 'static,
    {
        self.handlers.insert(
            name.to_string(),
            CommandHandler {
                guard: None,
                handle: Box::new(handler),
            },
        );
        self
    }

    /// Register a command handler with a guard function.
    ///
    /// The guard runs before the handler. If it returns `false`, the command
    /// is rejected with `ServiceError::GuardRejected`.
    pub fn command_guarded<G, F>(mut self, name: &str, guard: G, handler: F) -> Self
    where
        G: Fn(&Context<'_, A>) -> bool + Send + Sync + 'static,
        F: Fn(&mut Context<'_, A>) -> Result<Value, ServiceError> + Send + Sync + 'static,
    {
        self.handlers.insert(
            name.to_string(),
            CommandHandler {
                guard: Some(Box::new(guard)),
                handle: Box::new(handler),
            },
        );
        self
    }

    /// Dispatch a command by name on behalf of `session`.
    ///
    /// Handlers may change the session (sign in, open a recipe); the caller
    /// is responsible for persisting it afterwards.
    pub fn dispatch(
        &self,
        command: &str,
        input: Value,
        session: &mut Session,
    ) -> Result<Value, ServiceError> {
        let span = info_span!("command", name = command, user = session.user().unwrap_or("-"));
        let _entered = span.enter();

        let handler = self
            .handlers
            .get(command)
            .ok_or_else(|| ServiceError::UnknownCommand(command.to_string()))?;

        let mut ctx = Context::new(input, session, &self.app);

        if let Some(guard) = &handler.guard {
            if !guard(&ctx) {
                debug!("guard rejected");
                return Err(ServiceError::GuardRejected(command.to_string()));
            }
        }

        let result = (handler.handle)(&mut ctx);
        match &result {
            Ok(_) => debug!("handled"),
            Err(err) if err.status_code() >= 500 => warn!(error = %err, "command failed"),
            Err(err) => debug!(error = %err, "command rejected"),
        }
        result
    }

    /// Registered command names, sorted.
    pub fn commands(&self) -> Vec<&str> {
        self.handlers.keys().map(String::as_str).collect()
    }

    pub fn app(&self) -> &A {
        &self.app
    }
}
