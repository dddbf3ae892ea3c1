//! Backend config assembly.
//!
//! `ConfigBuilder` turns one [`BuildConfig`] into the sequence of
//! generated backend configurations: an optional index config for the
//! package's main entry, plus exactly one config per declared export, in
//! declaration order. The builder is pure: it accumulates nothing and
//! produces structurally identical output for identical input.

use indexmap::IndexMap;
use path_clean::PathClean;
use std::path::{Path, PathBuf};

use crate::config::{BuildConfig, BuildMode, TranspileOptions};
use crate::externals::ExternalsAssembler;
use crate::generated::{
    EntryDescriptor, Experiments, GeneratedBuildConfig, MinimizerOptions, ModuleSection,
    Optimization, OutputEnvironment, OutputLibrary, OutputSection, ResolveFallback,
    ResolveSection, RuleUse, TranspileRule,
};
use crate::resolver::ExportDescriptorResolver;
use crate::Result;

/// Reserved namespace segment all generated entries are keyed under.
pub const ENTRY_NAMESPACE: &str = "__gangway__";

/// Loader name for script/typed-script transpilation.
const TRANSPILE_LOADER: &str = "transpile";

/// Loader name for style compilation.
const STYLE_LOADER: &str = "style";

/// One named unit of bundling work submitted to the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildEntry {
    /// Namespaced entry key, e.g. `__gangway__/exports/scope$pkg`.
    pub key: String,
    /// Flattened name used for artifact files (`index` for the index entry).
    pub flat_name: String,
    pub config: GeneratedBuildConfig,
}

pub struct ConfigBuilder<'a> {
    project_dir: &'a Path,
    build: &'a BuildConfig,
    mode: BuildMode,
    assembler: &'a ExternalsAssembler,
    resolver: &'a ExportDescriptorResolver,
}

impl<'a> ConfigBuilder<'a> {
    pub fn new(
        project_dir: &'a Path,
        build: &'a BuildConfig,
        mode: BuildMode,
        assembler: &'a ExternalsAssembler,
        resolver: &'a ExportDescriptorResolver,
    ) -> Self {
        Self {
            project_dir,
            build,
            mode,
            assembler,
            resolver,
        }
    }

    /// Config for the index bundle, or `None` when no main entry exists.
    pub fn index_config(&self, transpile: &TranspileOptions) -> Result<Option<BuildEntry>> {
        let Some(main) = &self.build.main else {
            return Ok(None);
        };

        let main_path = self.resolve_path(Path::new(main));
        let externals = self.assembler.for_index(&self.build.imports)?;
        let transpile_options = serde_json::to_value(transpile)?;

        let rules = vec![
            TranspileRule {
                test: r"\.jsx?$".into(),
                exclude: Some("node_modules".into()),
                use_: RuleUse {
                    loader: TRANSPILE_LOADER.into(),
                    options: Some(transpile_options.clone()),
                },
            },
            TranspileRule {
                test: r"\.scss$".into(),
                exclude: Some("node_modules".into()),
                use_: RuleUse {
                    loader: STYLE_LOADER.into(),
                    options: Some(serde_json::json!({
                        "projectDir": self.project_dir,
                        "output": &self.build.output,
                    })),
                },
            },
            TranspileRule {
                test: r"\.tsx?$".into(),
                exclude: Some("node_modules".into()),
                use_: RuleUse {
                    loader: TRANSPILE_LOADER.into(),
                    options: Some(transpile_options),
                },
            },
        ];

        let key = format!("{ENTRY_NAMESPACE}/index");
        let config = self.assemble(
            &key,
            main_path.to_string_lossy().into_owned(),
            externals,
            rules,
            vec![".js", ".jsx", ".ts", ".tsx"],
        );

        Ok(Some(BuildEntry {
            key,
            flat_name: "index".into(),
            config,
        }))
    }

    /// One config per export item, in declaration order.
    ///
    /// Resolution happens here: an introspection failure aborts the whole
    /// sequence before any config is returned.
    pub fn export_configs(&self) -> Result<Vec<BuildEntry>> {
        let export_options = serde_json::to_value(TranspileOptions::export_defaults())?;

        self.build
            .exports
            .iter()
            .map(|item| {
                let resolved = self.resolver.resolve(item)?;
                let externals = self
                    .assembler
                    .for_export(&self.build.imports, &resolved.pkg_name)?;

                let rules = vec![TranspileRule {
                    test: r"\.js$".into(),
                    exclude: Some("node_modules".into()),
                    use_: RuleUse {
                        loader: TRANSPILE_LOADER.into(),
                        options: Some(export_options.clone()),
                    },
                }];

                let key = format!("{ENTRY_NAMESPACE}/exports/{}", resolved.flat_name);
                let config =
                    self.assemble(&key, resolved.import.as_specifier(), externals, rules, vec![]);

                Ok(BuildEntry {
                    key,
                    flat_name: resolved.flat_name,
                    config,
                })
            })
            .collect()
    }

    fn assemble(
        &self,
        key: &str,
        import: String,
        externals: IndexMap<String, String>,
        rules: Vec<TranspileRule>,
        extensions: Vec<&str>,
    ) -> GeneratedBuildConfig {
        let mut entry = IndexMap::new();
        entry.insert(key.to_string(), EntryDescriptor { import });

        GeneratedBuildConfig {
            entry,
            experiments: Experiments {
                output_module: true,
            },
            externals,
            externals_type: "module".into(),
            module: ModuleSection { rules },
            optimization: Optimization {
                minimize: true,
                minimizer: MinimizerOptions {
                    keep_classnames: true,
                    keep_fnames: true,
                },
            },
            output: OutputSection {
                environment: OutputEnvironment {
                    dynamic_import: true,
                    module: true,
                },
                filename: "[name].js".into(),
                library: OutputLibrary {
                    kind: "module".into(),
                },
                path: self.resolve_path(&self.build.output),
            },
            resolve: ResolveSection {
                extensions: extensions.into_iter().map(String::from).collect(),
                fallback: ResolveFallback { path: false },
            },
            devtool: self.mode.devtool().map(String::from),
            mode: self.mode.as_str().into(),
        }
    }

    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf().clean()
        } else {
            self.project_dir.join(path).clean()
        }
    }
}
