// SPDX-License-Identifier: MIT OR Apache-2.0

//! Proxy factories.
//!
//! A proxy is a lazily initialised stand-in for a document, written as a Rust
//! source file next to the other proxies of its document manager. In development
//! mode proxies are regenerated on demand; otherwise they are expected to have
//! been generated ahead of time (see the `generate:proxies` command) and the
//! factory only locates them.

use crate::domain::metadata::{short_type_name, type_file_stem};
use crate::domain::{ConfigError, DocumentMetadata, Result};
use crate::ports::MetadataFactory;
use directories::ProjectDirs;
use std::fmt::{self, Write as _};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Returns the default proxy directory of the document manager `alias`.
///
/// This is `<cache dir>/proxies/<alias>`, where the cache directory is the OS
/// cache location for `odmwire`, or `<temp dir>/odmwire` without a home directory.
pub fn default_proxy_dir(alias: &str) -> PathBuf {
    let cache_dir = ProjectDirs::from("", "", "odmwire")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| std::env::temp_dir().join("odmwire"));
    cache_dir.join("proxies").join(alias)
}

/// A located proxy: its type name and source file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProxyClass {
    /// Fully qualified proxy name, `<namespace>::<Type>Proxy`.
    pub name: String,
    /// The proxy source file.
    pub path: PathBuf,
}

/// Locates and, in development mode, generates proxies.
///
/// # Examples
///
/// ```rust
/// use odmwire::adapters::StaticMetadataFactory;
/// use odmwire::domain::DocumentMapping;
/// use odmwire::service::ProxyFactory;
/// use std::sync::Arc;
///
/// let metadata = Arc::new(StaticMetadataFactory::new().with_mapping("blog::Post", DocumentMapping::default()));
/// let factory = ProxyFactory::generating("var/proxies", "Proxies", metadata);
///
/// assert_eq!(factory.proxy_class_name("blog::Post"), "Proxies::PostProxy");
/// assert!(factory.proxy_path("blog::Post").ends_with("blog_post_proxy.rs"));
/// ```
#[derive(Clone)]
pub enum ProxyFactory {
    /// Writes proxy sources on demand.
    Generating {
        /// Directory proxies are written to.
        dir: PathBuf,
        /// Namespace proxy names are placed in.
        namespace: String,
        /// Metadata the proxies are generated from.
        metadata: Arc<dyn MetadataFactory>,
    },
    /// Only loads proxies generated beforehand.
    Compiled {
        /// Directory proxies are read from.
        dir: PathBuf,
        /// Namespace proxy names are placed in.
        namespace: String,
    },
}

impl fmt::Debug for ProxyFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let variant = if self.is_generating() {
            "Generating"
        } else {
            "Compiled"
        };
        f.debug_struct(variant)
            .field("dir", &self.dir())
            .field("namespace", &self.namespace())
            .finish()
    }
}

impl ProxyFactory {
    /// Creates a generating factory.
    pub fn generating(
        dir: impl Into<PathBuf>,
        namespace: impl Into<String>,
        metadata: Arc<dyn MetadataFactory>,
    ) -> Self {
        ProxyFactory::Generating {
            dir: dir.into(),
            namespace: namespace.into(),
            metadata,
        }
    }

    /// Creates a factory that only loads compiled proxies.
    pub fn compiled(dir: impl Into<PathBuf>, namespace: impl Into<String>) -> Self {
        ProxyFactory::Compiled {
            dir: dir.into(),
            namespace: namespace.into(),
        }
    }

    /// Proxy directory.
    pub fn dir(&self) -> &Path {
        match self {
            ProxyFactory::Generating { dir, .. } | ProxyFactory::Compiled { dir, .. } => dir,
        }
    }

    /// Proxy namespace.
    pub fn namespace(&self) -> &str {
        match self {
            ProxyFactory::Generating { namespace, .. }
            | ProxyFactory::Compiled { namespace, .. } => namespace,
        }
    }

    /// Returns true for a generating factory.
    pub fn is_generating(&self) -> bool {
        matches!(self, ProxyFactory::Generating { .. })
    }

    /// Name of the proxy of `type_name`.
    pub fn proxy_class_name(&self, type_name: &str) -> String {
        format!("{}::{}Proxy", self.namespace(), short_type_name(type_name))
    }

    /// Source file of the proxy of `type_name`.
    pub fn proxy_path(&self, type_name: &str) -> PathBuf {
        self.dir()
            .join(format!("{}_proxy.rs", type_file_stem(type_name)))
    }

    fn proxy_class(&self, type_name: &str) -> ProxyClass {
        ProxyClass {
            name: self.proxy_class_name(type_name),
            path: self.proxy_path(type_name),
        }
    }

    /// Writes the proxy source of `type_name`.
    ///
    /// Fails with `NoMetadata` for types that are not mapped documents and with
    /// `ProxyGenerationDisabled` on a compiled factory.
    pub fn generate_proxy_class(&self, type_name: &str) -> Result<ProxyClass> {
        let ProxyFactory::Generating { dir, metadata, .. } = self else {
            return Err(ConfigError::ProxyGenerationDisabled {
                type_name: type_name.to_string(),
            });
        };

        let document = metadata.get_metadata(type_name)?;
        let proxy = self.proxy_class(type_name);
        let source = render_proxy(&document)?;

        fs::create_dir_all(dir)?;
        fs::write(&proxy.path, source)?;
        tracing::debug!("Generated proxy {} at {}", proxy.name, proxy.path.display());

        Ok(proxy)
    }

    /// Returns the proxy of `type_name`, generating it first in development mode.
    pub fn get_proxy_class(&self, type_name: &str) -> Result<ProxyClass> {
        if self.is_generating() {
            return self.generate_proxy_class(type_name);
        }

        let proxy = self.proxy_class(type_name);
        if proxy.path.is_file() {
            Ok(proxy)
        } else {
            Err(ConfigError::ProxyNotCompiled {
                type_name: type_name.to_string(),
                path: proxy.path,
            })
        }
    }

    /// Returns a generating factory over the same directory and namespace.
    pub fn to_generating(&self, metadata: Arc<dyn MetadataFactory>) -> Self {
        ProxyFactory::generating(self.dir(), self.namespace(), metadata)
    }
}

/// Renders the proxy source of a document.
pub fn render_proxy(metadata: &DocumentMetadata) -> Result<String> {
    metadata.check_rust_names()?;

    let short_name = metadata.short_name();
    let type_name = &metadata.type_name;

    let mut out = String::new();
    let _ = writeln!(out, "// Proxy of `{}`. Regenerate instead of editing.", type_name);
    let _ = writeln!(out);
    let _ = writeln!(out, "/// Lazily loaded `{}`.", short_name);
    let _ = writeln!(out, "#[derive(Debug, Clone)]");
    let _ = writeln!(out, "pub struct {}Proxy {{", short_name);
    let _ = writeln!(out, "    identifier: String,");
    let _ = writeln!(out, "    document: Option<{}>,", type_name);
    let _ = writeln!(out, "}}");
    let _ = writeln!(out);
    let _ = writeln!(out, "impl {}Proxy {{", short_name);
    let _ = writeln!(
        out,
        "    pub const COLLECTION: &'static str = {:?};",
        metadata.collection
    );
    let _ = writeln!(
        out,
        "    pub const IDENTIFIER: &'static str = {:?};",
        metadata.identifier
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "    pub fn new(identifier: impl Into<String>) -> Self {{");
    let _ = writeln!(out, "        Self {{ identifier: identifier.into(), document: None }}");
    let _ = writeln!(out, "    }}");
    let _ = writeln!(out);
    let _ = writeln!(out, "    pub fn identifier(&self) -> &str {{");
    let _ = writeln!(out, "        &self.identifier");
    let _ = writeln!(out, "    }}");
    let _ = writeln!(out);
    let _ = writeln!(out, "    pub fn is_initialized(&self) -> bool {{");
    let _ = writeln!(out, "        self.document.is_some()");
    let _ = writeln!(out, "    }}");
    let _ = writeln!(out);
    let _ = writeln!(out, "    pub fn initialize(&mut self, document: {}) {{", type_name);
    let _ = writeln!(out, "        self.document = Some(document);");
    let _ = writeln!(out, "    }}");
    let _ = writeln!(out);
    let _ = writeln!(out, "    pub fn document(&self) -> Option<&{}> {{", type_name);
    let _ = writeln!(out, "        self.document.as_ref()");
    let _ = writeln!(out, "    }}");
    let _ = writeln!(out, "}}");
    Ok(out)
}
