// src/commands/mod.rs
mod files;
mod find;
mod greet;
mod open;

use log::debug;

use crate::error::VoxResult;
use crate::registry::Invocation;
use crate::terminal::Console;

pub use find::{find_paths, search_pattern, FoundPath};
pub use open::Opener;

/// Runs registry invocations. Every command, typed or suggested, ends up here.
pub struct Executor {
    opener: Opener,
}

impl Default for Executor {
    fn default() -> Self {
        Self::new(Opener::native())
    }
}

impl Executor {
    pub fn new(opener: Opener) -> Self {
        Executor { opener }
    }

    pub fn execute(&self, invocation: &Invocation, console: &mut Console) -> VoxResult<()> {
        debug!("Executing {:?}", invocation);
        match invocation {
            Invocation::Hello { name, times } => greet::hello(console, name, *times),
            Invocation::Goodbye => greet::goodbye(console),
            Invocation::View { filepath } => files::view(console, filepath),
            Invocation::Delete { path } => files::delete(console, path),
            Invocation::OpenPath { path } => open::open_path(console, &self.opener, path),
            Invocation::Find { name } => find::find(console, name),
            Invocation::CreateFile { filepath, content } => files::create_file(console, filepath, content),
        }
    }
}
