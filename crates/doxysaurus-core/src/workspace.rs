//! Loading a Doxygen XML directory into a linked, permalinked workspace.

use crate::diagnostics::Diagnostics;
use crate::error::{Error, LinkError, ParseError, Result};
use crate::hierarchy::Collections;
use crate::model::{parse_str, CompoundDef, Doxyfile, DoxygenFile, DoxygenIndex, FromXml};
use crate::options::Options;
use crate::permalink::Resolver;
use crate::render::{OutputFormat, Renderer};
use crate::sidebar::{build_sidebar, SidebarItem};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Everything the renderer needs, immutable once loaded.
#[derive(Debug)]
pub struct Workspace {
    pub collections: Collections,
    pub resolver: Resolver,
    pub options: Options,
    pub doxyfile: Option<Doxyfile>,
}

impl Workspace {
    /// Parse `index.xml` and every compound file it lists, then link.
    ///
    /// Compound files are parsed in parallel; the first failure in index
    /// order is returned.
    pub fn load(dir: &Path, options: Options, diagnostics: &Diagnostics) -> Result<Self> {
        let index: DoxygenIndex = read_xml(&dir.join("index.xml"), "doxygenindex")?;
        debug!(compounds = index.compounds.len(), dir = %dir.display(), "index parsed");

        let files: Vec<DoxygenFile> = index
            .compounds
            .par_iter()
            .map(|compound| read_xml(&dir.join(format!("{}.xml", compound.refid)), "doxygen"))
            .collect::<Result<_>>()?;
        let defs: Vec<CompoundDef> = files.into_iter().flat_map(|f| f.compounds).collect();

        let doxyfile_path = dir.join("Doxyfile.xml");
        let doxyfile = if doxyfile_path.is_file() {
            Some(read_xml::<Doxyfile>(&doxyfile_path, "doxyfile")?)
        } else {
            None
        };

        let mut workspace = Self::from_compounds(defs, options, diagnostics)?;
        workspace.doxyfile = doxyfile;
        info!(
            compounds = workspace.collections.len(),
            project = workspace.project_name().unwrap_or("-"),
            "workspace loaded"
        );
        Ok(workspace)
    }

    /// Link already parsed compounds and assign their permalinks.
    pub fn from_compounds(
        defs: Vec<CompoundDef>,
        options: Options,
        diagnostics: &Diagnostics,
    ) -> Result<Self, LinkError> {
        let mut collections = Collections::build(defs, diagnostics)?;
        let resolver = Resolver::assign(&mut collections);
        Ok(Self {
            collections,
            resolver,
            options,
            doxyfile: None,
        })
    }

    pub fn project_name(&self) -> Option<&str> {
        self.doxyfile.as_ref().and_then(Doxyfile::project_name)
    }

    pub fn renderer<'a>(&'a self, format: OutputFormat, diagnostics: &'a Diagnostics) -> Renderer<'a> {
        Renderer::new(&self.collections, &self.resolver, &self.options, format, diagnostics)
    }

    pub fn sidebar(&self) -> Vec<SidebarItem> {
        build_sidebar(&self.collections, &self.options)
    }
}

fn read_xml<T: FromXml>(path: &Path, root: &'static str) -> Result<T> {
    let text = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_str(&text, root).map_err(|source: ParseError| Error::Parse {
        path: PathBuf::from(path),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::CollectionKind;

    const INDEX: &str = r#"<?xml version="1.0"?>
<doxygenindex version="1.9.8">
  <compound refid="classwidget" kind="class"><name>Widget</name></compound>
</doxygenindex>"#;

    const WIDGET: &str = r#"<?xml version="1.0"?>
<doxygen version="1.9.8">
  <compounddef id="classwidget" kind="class" language="C++" prot="public">
    <compoundname>Widget</compoundname>
    <briefdescription><para>A widget.</para></briefdescription>
    <detaileddescription></detaileddescription>
    <location file="widget.h" line="3"/>
  </compounddef>
</doxygen>"#;

    #[test]
    fn loads_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("index.xml"), INDEX).unwrap();
        fs::write(dir.path().join("classwidget.xml"), WIDGET).unwrap();

        let workspace = Workspace::load(dir.path(), Options::default(), &Diagnostics::default()).unwrap();
        let widget = workspace.collections.classes.get("classwidget").unwrap();
        assert_eq!(widget.permalink, "classes/widget");
        assert!(workspace.doxyfile.is_none());

        let page = workspace
            .renderer(OutputFormat::Markdown, &Diagnostics::default())
            .render_compound(CollectionKind::Classes, "classwidget")
            .unwrap();
        assert_eq!(page.brief, "A widget.");
    }

    #[test]
    fn missing_compound_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("index.xml"), INDEX).unwrap();

        let err = Workspace::load(dir.path(), Options::default(), &Diagnostics::default()).unwrap_err();
        match err {
            Error::Io { path, .. } => assert!(path.ends_with("classwidget.xml")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn parse_errors_carry_the_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("index.xml"), "<doxygen/>").unwrap();

        let err = Workspace::load(dir.path(), Options::default(), &Diagnostics::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::Parse {
                source: ParseError::UnexpectedRoot { .. },
                ..
            }
        ));
        assert!(err.to_string().contains("index.xml"));
    }
}
