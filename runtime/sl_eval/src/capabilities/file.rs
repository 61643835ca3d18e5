//! The `file` capability: read-only access to a file on disk.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use sl_value::{resource_unavailable, Capability, EvalError, EvalResult, MethodTable, Value};

static FILE_METHODS: LazyLock<MethodTable<FileObject>> =
    LazyLock::new(|| MethodTable::new().with("read", 0, FileObject::read));

/// An open file handle.
///
/// The handle stays open for the object's lifetime and is closed when the
/// last `Value` referring to it is dropped.
#[derive(Debug)]
pub struct FileObject {
    path: PathBuf,
    file: File,
}

impl FileObject {
    /// Open `path` for reading.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, EvalError> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|err| resource_unavailable(&path.display().to_string(), err))?;
        tracing::debug!(path = %path.display(), "opened file");
        Ok(FileObject {
            path: path.to_path_buf(),
            file,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `read()`: everything from the current position to end of file.
    ///
    /// The position advances, so a second call returns `""`.
    fn read(&self, _args: &[Value]) -> EvalResult {
        let mut bytes = Vec::new();
        (&self.file)
            .read_to_end(&mut bytes)
            .map_err(|err| resource_unavailable(&self.path.display().to_string(), err))?;
        tracing::trace!(path = %self.path.display(), bytes = bytes.len(), "read file");
        Ok(Value::string(String::from_utf8_lossy(&bytes).into_owned()))
    }
}

impl Capability for FileObject {
    const TYPE_NAME: &'static str = "file";

    fn construct(arg: &Value) -> Result<Self, EvalError> {
        let path = arg
            .as_str()
            .map_err(|err| err.with_note("`file` takes the path as a string"))?;
        Self::open(path)
    }

    fn methods() -> &'static MethodTable<Self> {
        &FILE_METHODS
    }
}
