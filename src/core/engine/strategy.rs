use std::fmt;

/// How a frame is computed. Every strategy produces the same pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Single-threaded row-major scan.
    Reference,
    /// One row band per hardware thread.
    Parallel,
    /// The escape-time kernel on a GPU compute device.
    Accelerator,
}

impl Strategy {
    pub const ALL: &'static [Self] = &[Self::Reference, Self::Parallel, Self::Accelerator];

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Reference => "Reference (serial)",
            Self::Parallel => "Parallel (threads)",
            Self::Accelerator => "Accelerator (GPU)",
        }
    }

    /// Short tag used in output file names.
    #[must_use]
    pub const fn file_tag(self) -> &'static str {
        match self {
            Self::Reference => "serial",
            Self::Parallel => "parallel",
            Self::Accelerator => "gpu",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
