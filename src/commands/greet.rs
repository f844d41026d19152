use crate::error::VoxResult;
use crate::terminal::Console;

pub fn hello(console: &mut Console, name: &str, times: u32) -> VoxResult<()> {
    for _ in 0..times {
        console.line(format!("Hello, {}!", name))?;
    }
    Ok(())
}

pub fn goodbye(console: &mut Console) -> VoxResult<()> {
    console.line("Goodbye!")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::{ScriptedPrompter, SharedBuffer};

    fn console() -> (Console, SharedBuffer) {
        let buffer = SharedBuffer::new();
        let console = Console::new(Box::new(buffer.clone()), Box::new(ScriptedPrompter::new([])), ".");
        (console, buffer)
    }

    #[test]
    fn test_hello_honours_times() {
        let (mut console, buffer) = console();
        hello(&mut console, "Ada", 3).unwrap();
        assert_eq!(buffer.contents(), "Hello, Ada!\nHello, Ada!\nHello, Ada!\n");
    }

    #[test]
    fn test_goodbye() {
        let (mut console, buffer) = console();
        goodbye(&mut console).unwrap();
        assert_eq!(buffer.contents(), "Goodbye!\n");
    }
}
