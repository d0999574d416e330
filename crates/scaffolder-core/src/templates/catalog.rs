//! Built-in project blueprint
//!
//! The blueprint is plain immutable data: the generator to invoke, the
//! dependencies to install, and the directory and file overlay written on top
//! of the generator's output. File bodies live under `templates/react-ts/`
//! at the workspace root and are embedded at compile time.

/// A file written under the project root
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileTemplate {
    /// Path relative to the project root, `/`-separated
    pub path: &'static str,
    contents: &'static str,
}

impl FileTemplate {
    pub const fn new(path: &'static str, contents: &'static str) -> Self {
        Self { path, contents }
    }

    /// Produce the file body. Always the same bytes for the same template.
    pub fn render(&self) -> &'static str {
        self.contents
    }
}

/// External project generator invoked through `npm create`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generator {
    /// Package name passed to `npm create` (`vite` runs `create-vite`)
    pub package: &'static str,
    /// Generator template variant
    pub template: &'static str,
}

/// Everything needed to scaffold one kind of project
#[derive(Debug, Clone, Copy)]
pub struct Blueprint {
    pub generator: Generator,
    pub dependencies: &'static [&'static str],
    pub dev_dependencies: &'static [&'static str],
    /// Created in order, recursively, before any file is written
    pub directories: &'static [&'static str],
    /// Written in order after all directories exist
    pub files: &'static [FileTemplate],
}

macro_rules! asset {
    ($path:literal) => {
        include_str!(concat!("../../../../templates/react-ts/", $path))
    };
}

const REACT_TS_DIRECTORIES: &[&str] = &[
    "src/app",
    "src/api",
    "src/assets",
    "src/components/common",
    "src/components/ui",
    "src/features/auth/api",
    "src/features/auth/pages",
    "src/features/auth/types",
    "src/features/users/api",
    "src/features/users/pages",
    "src/features/users/types",
    "src/hooks",
    "src/layouts",
    "src/routes",
    "src/utils",
    "src/types",
];

const REACT_TS_FILES: &[FileTemplate] = &[
    FileTemplate::new("vite.config.ts", asset!("vite.config.ts")),
    FileTemplate::new("tsconfig.json", asset!("tsconfig.json")),
    FileTemplate::new(".env.example", asset!("env.example")),
    FileTemplate::new("src/api/axiosInstance.ts", asset!("src/api/axiosInstance.ts")),
    FileTemplate::new("src/app/store.ts", asset!("src/app/store.ts")),
    FileTemplate::new(
        "src/features/auth/auth.slice.ts",
        asset!("src/features/auth/auth.slice.ts"),
    ),
    FileTemplate::new(
        "src/features/auth/auth.thunks.ts",
        asset!("src/features/auth/auth.thunks.ts"),
    ),
    FileTemplate::new(
        "src/features/auth/auth.selectors.ts",
        asset!("src/features/auth/auth.selectors.ts"),
    ),
    FileTemplate::new(
        "src/features/users/users.slice.ts",
        asset!("src/features/users/users.slice.ts"),
    ),
    FileTemplate::new(
        "src/features/users/users.thunks.ts",
        asset!("src/features/users/users.thunks.ts"),
    ),
    FileTemplate::new(
        "src/features/users/users.selectors.ts",
        asset!("src/features/users/users.selectors.ts"),
    ),
    FileTemplate::new("src/hooks/useAppDispatch.ts", asset!("src/hooks/useAppDispatch.ts")),
    FileTemplate::new("src/hooks/useAppSelector.ts", asset!("src/hooks/useAppSelector.ts")),
    FileTemplate::new("src/routes/AppRoutes.tsx", asset!("src/routes/AppRoutes.tsx")),
    FileTemplate::new("src/App.tsx", asset!("src/App.tsx")),
    // Replaces the generator's entry point to add the store provider
    FileTemplate::new("src/main.tsx", asset!("src/main.tsx")),
];

/// React + TypeScript with routing, Redux Toolkit and axios
pub static REACT_TS: Blueprint = Blueprint {
    generator: Generator {
        package: "vite",
        template: "react-ts",
    },
    dependencies: &["react-router-dom", "@reduxjs/toolkit", "react-redux", "axios"],
    // Needed by the `path` import in vite.config.ts
    dev_dependencies: &["@types/node"],
    directories: REACT_TS_DIRECTORIES,
    files: REACT_TS_FILES,
};

pub fn react_ts() -> &'static Blueprint {
    &REACT_TS
}
