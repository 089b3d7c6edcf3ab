//! Command definitions and handler outcomes.

use std::fmt;
use std::rc::Rc;

use mudcore_foundation::{CharacterId, Result, RoomId, Value};
use mudcore_parser::{Argument, Command, Grammar};

use crate::context::CommandContext;

/// What a handler (or a whole dispatch level) did with a line.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The input was consumed.
    Handled,
    /// Not for this handler; later levels of the chain may still try.
    NotHandled,
    /// Consumed, but a gate stopped the handler from running.
    Blocked,
}

impl CommandOutcome {
    /// Whether the chain should stop here.
    #[must_use]
    pub fn is_handled(self) -> bool {
        !matches!(self, Self::NotHandled)
    }
}

impl From<bool> for CommandOutcome {
    fn from(handled: bool) -> Self {
        if handled {
            Self::Handled
        } else {
            Self::NotHandled
        }
    }
}

/// Which registry a definition was found in.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Origin {
    /// The process-wide registry.
    Global,
    /// A room's local registry.
    Room(RoomId),
    /// A character's local registry.
    Character(CharacterId),
}

/// Everything a handler gets about the line it is running for.
#[derive(Debug)]
pub struct Invocation<'a> {
    /// Who typed the line.
    pub actor: CharacterId,
    /// The tokenized line.
    pub command: &'a Command,
    /// Grammar bindings. `None` if the definition has a grammar and the
    /// parameters did not fit it; `Some(vec![])` if there is no grammar.
    pub args: Option<Vec<Argument>>,
    /// Where the definition was registered.
    pub origin: Origin,
    /// The definition's opaque data.
    pub data: Option<&'a Value>,
}

impl Invocation<'_> {
    /// The `index`-th bound argument.
    #[must_use]
    pub fn arg(&self, index: usize) -> Option<&Argument> {
        self.args.as_ref()?.get(index)
    }
}

/// A command handler.
pub type Handler = Rc<dyn Fn(&mut CommandContext<'_>, &Invocation<'_>) -> CommandOutcome>;

/// A named command and the gates in front of its handler.
#[derive(Clone)]
pub struct CommandDefinition {
    name: String,
    aliases: Vec<String>,
    requires_admin: bool,
    requires_balance: bool,
    grammar: Option<Grammar>,
    data: Option<Value>,
    handler: Handler,
}

impl CommandDefinition {
    /// Creates a definition. The name is lower-cased.
    pub fn new<F>(name: &str, handler: F) -> Self
    where
        F: Fn(&mut CommandContext<'_>, &Invocation<'_>) -> CommandOutcome + 'static,
    {
        Self {
            name: name.to_lowercase(),
            aliases: Vec::new(),
            requires_admin: false,
            requires_balance: false,
            grammar: None,
            data: None,
            handler: Rc::new(handler),
        }
    }

    /// Builder method to add aliases (lower-cased).
    #[must_use]
    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.aliases
            .extend(aliases.into_iter().map(|a| a.as_ref().to_lowercase()));
        self
    }

    /// Builder method to restrict the command to admins.
    #[must_use]
    pub fn admin_only(mut self) -> Self {
        self.requires_admin = true;
        self
    }

    /// Builder method to refuse the command while the actor is off balance.
    #[must_use]
    pub fn requires_balance(mut self) -> Self {
        self.requires_balance = true;
        self
    }

    /// Builder method to attach an argument grammar.
    ///
    /// # Errors
    ///
    /// Returns `InvalidGrammar` if the grammar does not compile.
    pub fn with_grammar(mut self, grammar: &str) -> Result<Self> {
        self.grammar = Some(Grammar::compile(grammar)?);
        Ok(self)
    }

    /// Builder method to attach opaque data passed to every invocation.
    #[must_use]
    pub fn with_data(mut self, data: impl Into<Value>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Canonical lower-case name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lower-case aliases.
    #[must_use]
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Whether only admins may run it.
    #[must_use]
    pub fn is_admin_only(&self) -> bool {
        self.requires_admin
    }

    /// Whether it is refused while the actor is off balance.
    #[must_use]
    pub fn is_balance_gated(&self) -> bool {
        self.requires_balance
    }

    /// The compiled grammar, if any.
    #[must_use]
    pub fn grammar(&self) -> Option<&Grammar> {
        self.grammar.as_ref()
    }

    /// The opaque data, if any.
    #[must_use]
    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    /// Runs the handler without any gating.
    pub fn invoke(
        &self,
        ctx: &mut CommandContext<'_>,
        invocation: &Invocation<'_>,
    ) -> CommandOutcome {
        (self.handler)(ctx, invocation)
    }
}

impl fmt::Debug for CommandDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDefinition")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("requires_admin", &self.requires_admin)
            .field("requires_balance", &self.requires_balance)
            .field("grammar", &self.grammar.as_ref().map(Grammar::source))
            .finish_non_exhaustive()
    }
}
