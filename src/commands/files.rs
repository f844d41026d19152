use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use log::info;

use crate::error::{VoxError, VoxResult};
use crate::terminal::Console;
use crate::utils::escape::unescape;

pub fn view(console: &mut Console, filepath: &Path) -> VoxResult<()> {
    let target = console.resolve(filepath);
    let contents = fs::read_to_string(&target).map_err(|e| match e.kind() {
        ErrorKind::NotFound => VoxError::NotFound(filepath.to_path_buf()),
        _ => VoxError::io("failed to read", filepath, e),
    })?;

    console.line(contents.strip_suffix('\n').unwrap_or(&contents))
}

pub fn delete(console: &mut Console, path: &Path) -> VoxResult<()> {
    let target = console.resolve(path);
    // Symlinks are removed themselves, never followed.
    let metadata = match fs::symlink_metadata(&target) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => return Err(VoxError::NotFound(path.to_path_buf())),
        Err(e) => return Err(VoxError::io("failed to inspect", path, e)),
    };
    let (kind, label) = if metadata.is_dir() {
        ("directory", "Directory")
    } else {
        ("file", "File")
    };

    let question = format!("Are you sure you want to delete the {} '{}'?", kind, path.display());
    if !console.confirm(&question)? {
        return console.line("Deletion cancelled.");
    }

    let removed = if metadata.is_dir() {
        fs::remove_dir_all(&target)
    } else {
        fs::remove_file(&target)
    };
    removed.map_err(|e| VoxError::io("failed to delete", path, e))?;

    info!("Deleted {} {}", kind, target.display());
    console.line(format!("{} '{}' has been deleted.", label, path.display()))
}

/// Writes `content` after decoding backslash escapes. Existing files are overwritten.
pub fn create_file(console: &mut Console, filepath: &Path, content: &str) -> VoxResult<()> {
    let target = console.resolve(filepath);
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|e| VoxError::io("failed to create", parent, e))?;
    }

    fs::write(&target, unescape(content)).map_err(|e| VoxError::io("failed to write", filepath, e))?;

    info!("Created {}", target.display());
    console.success(format!("Successfully created file: {}", filepath.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::{ScriptedPrompter, SharedBuffer};
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    fn console_in(dir: &Path, answers: Vec<bool>) -> (Console, SharedBuffer, Arc<Mutex<Vec<String>>>) {
        let buffer = SharedBuffer::new();
        let prompter = ScriptedPrompter::new(answers);
        let questions = prompter.questions();
        let console = Console::new(Box::new(buffer.clone()), Box::new(prompter), dir);
        (console, buffer, questions)
    }

    #[test]
    fn test_create_file_decodes_newlines() {
        let dir = TempDir::new().unwrap();
        let (mut console, buffer, _) = console_in(dir.path(), vec![]);

        create_file(&mut console, Path::new("a.txt"), "a\\nb").unwrap();

        let written = fs::read_to_string(dir.path().join("a.txt")).unwrap();
        assert_eq!(written, "a\nb");
        assert_eq!(written.lines().collect::<Vec<_>>(), vec!["a", "b"]);
        assert!(buffer.contents().contains("Successfully created file: a.txt"));
    }

    #[test]
    fn test_create_file_makes_parents_and_overwrites() {
        let dir = TempDir::new().unwrap();
        let (mut console, _, _) = console_in(dir.path(), vec![]);

        create_file(&mut console, Path::new("deep/er/file.txt"), "old").unwrap();
        create_file(&mut console, Path::new("deep/er/file.txt"), "new").unwrap();

        assert_eq!(fs::read_to_string(dir.path().join("deep/er/file.txt")).unwrap(), "new");
    }

    #[test]
    fn test_create_file_with_empty_content() {
        let dir = TempDir::new().unwrap();
        let (mut console, _, _) = console_in(dir.path(), vec![]);

        create_file(&mut console, Path::new("empty.txt"), "").unwrap();
        assert_eq!(fs::read_to_string(dir.path().join("empty.txt")).unwrap(), "");
    }

    #[test]
    fn test_view_prints_contents() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("notes.txt"), "line one\nline two\n").unwrap();
        let (mut console, buffer, _) = console_in(dir.path(), vec![]);

        view(&mut console, Path::new("notes.txt")).unwrap();
        assert_eq!(buffer.contents(), "line one\nline two\n");
    }

    #[test]
    fn test_view_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let (mut console, _, _) = console_in(dir.path(), vec![]);

        let err = view(&mut console, Path::new("missing.txt")).unwrap_err();
        assert!(matches!(err, VoxError::NotFound(p) if p == Path::new("missing.txt")));
    }

    #[test]
    fn test_view_binary_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("blob.bin"), [0xff, 0xfe, 0x00, 0x80]).unwrap();
        let (mut console, _, _) = console_in(dir.path(), vec![]);

        let err = view(&mut console, Path::new("blob.bin")).unwrap_err();
        assert!(matches!(err, VoxError::Io { .. }));
    }

    #[test]
    fn test_delete_missing_path_does_not_prompt() {
        let dir = TempDir::new().unwrap();
        let (mut console, _, questions) = console_in(dir.path(), vec![true]);

        let err = delete(&mut console, Path::new("ghost")).unwrap_err();
        assert!(matches!(err, VoxError::NotFound(_)));
        assert!(questions.lock().unwrap().is_empty());
    }

    #[test]
    fn test_delete_declined_keeps_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("keep.txt");
        fs::write(&file, "x").unwrap();
        let (mut console, buffer, questions) = console_in(dir.path(), vec![false]);

        delete(&mut console, Path::new("keep.txt")).unwrap();

        assert!(file.exists());
        assert!(questions.lock().unwrap()[0].contains("the file 'keep.txt'"));
        assert!(buffer.contents().contains("Deletion cancelled."));
    }

    #[test]
    fn test_delete_file_and_directory_tree() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("gone.txt"), "x").unwrap();
        fs::create_dir_all(dir.path().join("tree/sub")).unwrap();
        fs::write(dir.path().join("tree/sub/leaf.txt"), "x").unwrap();
        let (mut console, buffer, questions) = console_in(dir.path(), vec![true, true]);

        delete(&mut console, Path::new("gone.txt")).unwrap();
        delete(&mut console, Path::new("tree")).unwrap();

        assert!(!dir.path().join("gone.txt").exists());
        assert!(!dir.path().join("tree").exists());
        assert!(questions.lock().unwrap()[1].contains("the directory 'tree'"));
        let out = buffer.contents();
        assert!(out.contains("File 'gone.txt' has been deleted."));
        assert!(out.contains("Directory 'tree' has been deleted."));
    }
}
