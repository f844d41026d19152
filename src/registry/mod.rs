//! The catalog of local commands the assistant may run.
//!
//! One static table drives three things: the clap parser used for both
//! typed and suggested command lines, the catalog text embedded in the
//! model prompt, and the typed [`Invocation`] handed to the executors.

mod suggestions;

use std::path::PathBuf;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use log::debug;

use crate::error::{VoxError, VoxResult};

pub use suggestions::closest_match;

pub const BIN_NAME: &str = "voxcmd";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamKind {
    Text,
    Path,
    Integer,
    Flag,
}

#[derive(Clone, Copy, Debug)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub help: &'static str,
    /// `None` for positional parameters.
    pub long: Option<&'static str>,
    pub short: Option<char>,
    pub value_name: &'static str,
    pub default: Option<&'static str>,
}

impl ParamSpec {
    pub const fn positional(name: &'static str, kind: ParamKind, help: &'static str) -> Self {
        ParamSpec {
            name,
            kind,
            help,
            long: None,
            short: None,
            value_name: name,
            default: None,
        }
    }

    pub const fn option(
        name: &'static str,
        long: &'static str,
        short: char,
        kind: ParamKind,
        value_name: &'static str,
        default: Option<&'static str>,
        help: &'static str,
    ) -> Self {
        ParamSpec {
            name,
            kind,
            help,
            long: Some(long),
            short: Some(short),
            value_name,
            default,
        }
    }

    pub fn is_positional(&self) -> bool {
        self.long.is_none()
    }

    pub fn usage(&self) -> String {
        match (self.long, self.kind) {
            (None, _) => format!("<{}>", self.name),
            (Some(long), ParamKind::Flag) => format!("[--{}]", long),
            (Some(long), _) => format!("[--{} {}]", long, self.value_name),
        }
    }

    fn to_arg(&self) -> Arg {
        let mut arg = Arg::new(self.name).help(self.help);
        if let Some(long) = self.long {
            arg = arg.long(long);
        }
        if let Some(short) = self.short {
            arg = arg.short(short);
        }

        arg = match self.kind {
            ParamKind::Text => arg.value_name(self.value_name).value_parser(value_parser!(String)),
            ParamKind::Path => arg.value_name(self.value_name).value_parser(value_parser!(PathBuf)),
            ParamKind::Integer => arg.value_name(self.value_name).value_parser(value_parser!(u32).range(1..)),
            ParamKind::Flag => arg.action(ArgAction::SetTrue),
        };

        if let Some(default) = self.default {
            arg = arg.default_value(default);
        } else if self.is_positional() {
            arg = arg.required(true);
        }
        arg
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandKind {
    Hello,
    Goodbye,
    View,
    Delete,
    OpenPath,
    Find,
    CreateFile,
}

#[derive(Debug)]
pub struct CommandSpec {
    pub kind: CommandKind,
    pub name: &'static str,
    pub about: &'static str,
    pub params: &'static [ParamSpec],
}

impl CommandSpec {
    /// `name <positional> [--option VALUE]`, exactly as shown to the model.
    pub fn usage(&self) -> String {
        std::iter::once(self.name.to_string())
            .chain(self.params.iter().map(ParamSpec::usage))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn to_clap(&self) -> Command {
        Command::new(self.name)
            .about(self.about)
            .args(self.params.iter().map(ParamSpec::to_arg))
    }
}

static COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        kind: CommandKind::Hello,
        name: "hello",
        about: "Greet someone",
        params: &[
            ParamSpec::positional("name", ParamKind::Text, "Who to greet"),
            ParamSpec::option("times", "times", 't', ParamKind::Integer, "NUMBER", Some("1"), "How many times to greet"),
        ],
    },
    CommandSpec {
        kind: CommandKind::Goodbye,
        name: "goodbye",
        about: "Say goodbye",
        params: &[],
    },
    CommandSpec {
        kind: CommandKind::View,
        name: "view",
        about: "Print the contents of a text file",
        params: &[ParamSpec::positional("filepath", ParamKind::Path, "File to print")],
    },
    CommandSpec {
        kind: CommandKind::Delete,
        name: "delete",
        about: "Delete a file or a directory tree, after confirmation",
        params: &[ParamSpec::positional("path", ParamKind::Path, "File or directory to delete")],
    },
    CommandSpec {
        kind: CommandKind::OpenPath,
        name: "open-path",
        about: "Open a file or directory with its default application",
        params: &[ParamSpec::positional("path", ParamKind::Path, "File or directory to open")],
    },
    CommandSpec {
        kind: CommandKind::Find,
        name: "find",
        about: "Search the current directory tree by name (wildcards allowed)",
        params: &[ParamSpec::positional("name", ParamKind::Text, "Name or glob pattern")],
    },
    CommandSpec {
        kind: CommandKind::CreateFile,
        name: "create-file",
        about: "Create a file, decoding escapes like \\n in its content",
        params: &[
            ParamSpec::positional("filepath", ParamKind::Path, "Path of the file to create"),
            ParamSpec::option("content", "content", 'c', ParamKind::Text, "\"...\"", None, "Text to write into the file"),
        ],
    },
];

/// A fully parsed, typed request for one registry command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Invocation {
    Hello { name: String, times: u32 },
    Goodbye,
    View { filepath: PathBuf },
    Delete { path: PathBuf },
    OpenPath { path: PathBuf },
    Find { name: String },
    CreateFile { filepath: PathBuf, content: String },
}

impl Invocation {
    pub fn kind(&self) -> CommandKind {
        match self {
            Invocation::Hello { .. } => CommandKind::Hello,
            Invocation::Goodbye => CommandKind::Goodbye,
            Invocation::View { .. } => CommandKind::View,
            Invocation::Delete { .. } => CommandKind::Delete,
            Invocation::OpenPath { .. } => CommandKind::OpenPath,
            Invocation::Find { .. } => CommandKind::Find,
            Invocation::CreateFile { .. } => CommandKind::CreateFile,
        }
    }

    fn from_matches(kind: CommandKind, m: &ArgMatches) -> VoxResult<Self> {
        Ok(match kind {
            CommandKind::Hello => Invocation::Hello {
                name: required(m, "name")?,
                times: m.get_one::<u32>("times").copied().unwrap_or(1),
            },
            CommandKind::Goodbye => Invocation::Goodbye,
            CommandKind::View => Invocation::View {
                filepath: required(m, "filepath")?,
            },
            CommandKind::Delete => Invocation::Delete {
                path: required(m, "path")?,
            },
            CommandKind::OpenPath => Invocation::OpenPath {
                path: required(m, "path")?,
            },
            CommandKind::Find => Invocation::Find {
                name: required(m, "name")?,
            },
            CommandKind::CreateFile => Invocation::CreateFile {
                filepath: required(m, "filepath")?,
                content: m.get_one::<String>("content").cloned().unwrap_or_default(),
            },
        })
    }
}

fn required<T: Clone + Send + Sync + 'static>(m: &ArgMatches, name: &str) -> VoxResult<T> {
    m.get_one::<T>(name)
        .cloned()
        .ok_or_else(|| VoxError::InvalidArguments(format!("missing required argument '{}'", name)))
}

#[derive(Clone, Copy)]
pub struct CommandRegistry {
    commands: &'static [CommandSpec],
}

impl CommandRegistry {
    pub fn builtin() -> Self {
        CommandRegistry { commands: COMMANDS }
    }

    pub fn commands(&self) -> &'static [CommandSpec] {
        self.commands
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.iter().map(|c| c.name)
    }

    pub fn lookup(&self, name: &str) -> Option<&'static CommandSpec> {
        self.commands.iter().find(|c| c.name == name)
    }

    /// Bulleted usage list embedded in the model prompt.
    pub fn render_catalog(&self) -> String {
        self.commands
            .iter()
            .map(|c| format!("- `{}`: {}", c.usage(), c.about))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Parser for registry commands only, shared by the CLI and the assistant.
    pub fn clap_command(&self) -> Command {
        Command::new(BIN_NAME)
            .subcommand_required(true)
            .subcommands(self.commands.iter().map(CommandSpec::to_clap))
    }

    /// Turn clap matches for the subcommand `name` into a typed invocation.
    pub fn invocation_from(&self, name: &str, matches: &ArgMatches) -> VoxResult<Invocation> {
        let spec = self.lookup(name).ok_or_else(|| self.unknown(name))?;
        Invocation::from_matches(spec.kind, matches)
    }

    /// Parse a full command line with shell quoting rules. A leading program
    /// name is tolerated.
    pub fn parse_line(&self, line: &str) -> VoxResult<Invocation> {
        let mut words = shellwords::split(line)
            .map_err(|_| VoxError::InvalidArguments("unbalanced quotes in command line".to_string()))?;
        if words.first().map(String::as_str) == Some(BIN_NAME) {
            words.remove(0);
        }
        self.parse_args(&words)
    }

    pub fn parse_args<S: AsRef<str>>(&self, args: &[S]) -> VoxResult<Invocation> {
        let name = args
            .first()
            .map(|s| s.as_ref())
            .ok_or_else(|| VoxError::InvalidArguments("empty command line".to_string()))?;
        if self.lookup(name).is_none() {
            return Err(self.unknown(name));
        }

        let matches = self
            .clap_command()
            .no_binary_name(true)
            .try_get_matches_from(args.iter().map(|s| s.as_ref()))
            .map_err(|e| VoxError::InvalidArguments(e.to_string().trim().to_string()))?;

        let (sub, sub_matches) = matches
            .subcommand()
            .ok_or_else(|| VoxError::InvalidArguments("missing command".to_string()))?;
        debug!("Parsed '{}' with {} argument(s)", sub, args.len() - 1);
        self.invocation_from(sub, sub_matches)
    }

    fn unknown(&self, name: &str) -> VoxError {
        VoxError::UnknownCommand {
            name: name.to_string(),
            hint: closest_match(name, self.names()).map(str::to_string),
        }
    }
}
