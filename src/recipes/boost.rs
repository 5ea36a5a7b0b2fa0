//! Recipe for Boost, the multi-library C++ collection.
//!
//! Boost is the one multi-library package in the set: which sub-libraries
//! exist depends on the version, so the recipe side-loads a per-version
//! dependency descriptor and derives the `with_<lib>` / `without_<lib>`
//! option surface from it. Translation turns those toggles into the
//! `BOOST_INCLUDE_LIBRARIES` / `BOOST_EXCLUDE_LIBRARIES` list flags, in
//! descriptor order.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::descriptor::default_descriptor_dir;
use crate::core::{DependencyDescriptor, OptionDomain, OptionSchema};
use crate::recipes::{
    declare_shared_fpic, shared_fpic_flags, unknown_version, BuildConfig, PackageType, Recipe,
    RecipeContext, RecipeMetadata, Requirement,
};
use crate::sources::SourceSpec;
use crate::util::process::{find_python, ProcessBuilder};
use crate::util::ConfigError;

/// Every sub-library any supported Boost version may provide. The
/// per-version descriptor selects the subset that actually exists; a
/// descriptor entry missing from this table is an authoring error.
pub const CONFIGURE_OPTIONS: &[&str] = &[
    "accumulators",
    "algorithm",
    "align",
    "any",
    "array",
    "asio",
    "assert",
    "assign",
    "atomic",
    "beast",
    "bimap",
    "bind",
    "bloom",
    "callable_traits",
    "charconv",
    "chrono",
    "circular_buffer",
    "cobalt",
    "compat",
    "compute",
    "concept_check",
    "config",
    "container",
    "container_hash",
    "context",
    "contract",
    "conversion",
    "convert",
    "core",
    "coroutine",
    "coroutine2",
    "crc",
    "date_time",
    "describe",
    "detail",
    "dll",
    "dynamic_bitset",
    "endian",
    "exception",
    "fiber",
    "filesystem",
    "flyweight",
    "foreach",
    "format",
    "function",
    "function_types",
    "functional",
    "fusion",
    "geometry",
    "gil",
    "graph",
    "graph_parallel",
    "hana",
    "hash2",
    "headers",
    "heap",
    "histogram",
    "hof",
    "icl",
    "integer",
    "interprocess",
    "intrusive",
    "io",
    "iostreams",
    "iterator",
    "json",
    "lambda",
    "lambda2",
    "leaf",
    "lexical_cast",
    "local_function",
    "locale",
    "lockfree",
    "log",
    "logic",
    "math",
    "metaparse",
    "move",
    "mp11",
    "mpi",
    "mpl",
    "mqtt5",
    "msm",
    "multi_array",
    "multi_index",
    "multiprecision",
    "mysql",
    "nowide",
    "numeric_conversion",
    "numeric_interval",
    "numeric_odeint",
    "numeric_ublas",
    "openmethod",
    "optional",
    "outcome",
    "parameter",
    "parameter_python",
    "parser",
    "pfr",
    "phoenix",
    "poly_collection",
    "polygon",
    "pool",
    "predef",
    "preprocessor",
    "process",
    "program_options",
    "property_map",
    "property_map_parallel",
    "property_tree",
    "proto",
    "ptr_container",
    "python",
    "qvm",
    "random",
    "range",
    "ratio",
    "rational",
    "redis",
    "regex",
    "safe_numerics",
    "scope",
    "scope_exit",
    "serialization",
    "signals2",
    "smart_ptr",
    "sort",
    "spirit",
    "stacktrace",
    "statechart",
    "static_assert",
    "static_string",
    "stl_interfaces",
    "system",
    "test",
    "thread",
    "throw_exception",
    "timer",
    "tokenizer",
    "tti",
    "tuple",
    "type_erasure",
    "type_index",
    "type_traits",
    "typeof",
    "units",
    "unordered",
    "url",
    "utility",
    "uuid",
    "variant",
    "variant2",
    "vmd",
    "wave",
    "winapi",
    "xpressive",
    "yap",
];

/// Optional boolean toggles mapped 1:1 to `BOOST_*_ENABLE_*` variables.
const FEATURE_TOGGLES: &[(&str, &str)] = &[
    ("iostreams_zlib", "BOOST_IOSTREAMS_ENABLE_ZLIB"),
    ("iostreams_bzip2", "BOOST_IOSTREAMS_ENABLE_BZIP2"),
    ("iostreams_lzma", "BOOST_IOSTREAMS_ENABLE_LZMA"),
    ("iostreams_zstd", "BOOST_IOSTREAMS_ENABLE_ZSTD"),
    ("locale_icu", "BOOST_LOCALE_ENABLE_ICU"),
    ("locale_iconv", "BOOST_LOCALE_ENABLE_ICONV"),
    ("locale_posix", "BOOST_LOCALE_ENABLE_POSIX"),
    ("locale_std", "BOOST_LOCALE_ENABLE_STD"),
    ("locale_winapi", "BOOST_LOCALE_ENABLE_WINAPI"),
    ("stacktrace_noop", "BOOST_STACKTRACE_ENABLE_NOOP"),
    ("stacktrace_backtrace", "BOOST_STACKTRACE_ENABLE_BACKTRACE"),
    ("stacktrace_addr2line", "BOOST_STACKTRACE_ENABLE_ADDR2LINE"),
    ("stacktrace_basic", "BOOST_STACKTRACE_ENABLE_BASIC"),
    ("stacktrace_windbg", "BOOST_STACKTRACE_ENABLE_WINDBG"),
    (
        "stacktrace_windbg_cached",
        "BOOST_STACKTRACE_ENABLE_WINDBG_CACHED",
    ),
    (
        "stacktrace_from_exception",
        "BOOST_STACKTRACE_ENABLE_FROM_EXCEPTION",
    ),
];

/// Optional string options passed through to same-named context variables.
const CONTEXT_OPTIONS: &[(&str, &str, &[&str])] = &[
    (
        "context_binary_format",
        "BOOST_CONTEXT_BINARY_FORMAT",
        &["elf", "mach-o", "pe", "xcoff"],
    ),
    (
        "context_abi",
        "BOOST_CONTEXT_ABI",
        &["aapcs", "eabi", "ms", "n32", "n64", "o32", "o64", "sysv", "x32"],
    ),
    (
        "context_architecture",
        "BOOST_CONTEXT_ARCHITECTURE",
        &[
            "arm",
            "arm64",
            "loongarch64",
            "mips32",
            "mips64",
            "ppc32",
            "ppc64",
            "riscv64",
            "s390x",
            "i386",
            "x86_64",
            "combined",
        ],
    ),
    (
        "context_assembler",
        "BOOST_CONTEXT_ASSEMBLER",
        &["masm", "gas", "armasm"],
    ),
    (
        "context_asm_suffix",
        "BOOST_CONTEXT_ASM_SUFFIX",
        &[".asm", ".S"],
    ),
    (
        "context_implementation",
        "BOOST_CONTEXT_IMPLEMENTATION",
        &["fcontext", "ucontext", "winfib"],
    ),
];

pub struct BoostRecipe {
    metadata: RecipeMetadata,
    descriptor_dir: PathBuf,
}

impl BoostRecipe {
    pub fn new() -> Self {
        Self::with_descriptor_dir(default_descriptor_dir())
    }

    /// Use a non-default descriptor directory (tests, vendored layouts).
    pub fn with_descriptor_dir(descriptor_dir: impl Into<PathBuf>) -> Self {
        BoostRecipe {
            metadata: RecipeMetadata {
                name: "boost",
                description: "Free peer-reviewed portable C++ source libraries",
                license: "BSL-1.0",
                homepage: "https://www.boost.org",
                package_type: PackageType::Library,
            },
            descriptor_dir: descriptor_dir.into(),
        }
    }

    fn descriptor_for<'a>(
        ctx: &'a RecipeContext,
    ) -> Result<&'a DependencyDescriptor, ConfigError> {
        ctx.descriptor.as_ref().ok_or_else(|| {
            ConfigError::AuthoringMismatch(
                "boost requires a dependency descriptor for its version".to_string(),
            )
        })
    }
}

impl Default for BoostRecipe {
    fn default() -> Self {
        Self::new()
    }
}

impl Recipe for BoostRecipe {
    fn metadata(&self) -> &RecipeMetadata {
        &self.metadata
    }

    fn load_descriptor(&self, version: &str) -> Result<Option<DependencyDescriptor>, ConfigError> {
        DependencyDescriptor::load(&self.descriptor_dir, "boost", version).map(Some)
    }

    fn option_schema(
        &self,
        _version: &str,
        descriptor: Option<&DependencyDescriptor>,
    ) -> Result<OptionSchema, ConfigError> {
        let descriptor = descriptor.ok_or_else(|| {
            ConfigError::AuthoringMismatch(
                "boost requires a dependency descriptor for its version".to_string(),
            )
        })?;

        // Every sub-library in the descriptor must have its option pair
        // in the authoritative table; anything else means the descriptor
        // and the recipe have drifted apart.
        for name in descriptor.libraries() {
            if !CONFIGURE_OPTIONS.contains(&name.as_str()) {
                return Err(ConfigError::AuthoringMismatch(format!(
                    "descriptor for boost {} lists `{}`, which has no with_/without_ option pair",
                    descriptor.version(),
                    name
                )));
            }
        }

        let mut schema = OptionSchema::new();
        declare_shared_fpic(&mut schema);

        schema.declare("runtime", OptionDomain::one_of(&["static", "shared"]));
        schema.declare_with_default("use_modules", OptionDomain::Bool, false);

        schema.declare("python_version", OptionDomain::Any);
        schema.declare("python_executable", OptionDomain::Any);

        schema.declare_with_default("asio_no_deprecated", OptionDomain::Bool, true);
        schema.declare_with_default("filesystem_no_deprecated", OptionDomain::Bool, true);
        schema.declare_with_default("filesystem_use_std_fs", OptionDomain::Bool, false);
        schema.declare("filesystem_version", OptionDomain::one_of(&["3", "4"]));
        schema.declare_with_default("system_use_utf8", OptionDomain::Bool, true);

        schema.declare(
            "layout",
            OptionDomain::one_of(&["system", "versioned", "tagged"]),
        );
        schema.declare(
            "visibility",
            OptionDomain::one_of(&["default", "hidden", "protected", "internal"]),
        );

        for (name, _, values) in CONTEXT_OPTIONS {
            schema.declare(*name, OptionDomain::one_of(values));
        }
        schema.declare(
            "fiber_numa_target_os",
            OptionDomain::one_of(&["aix", "freebsd", "hpux", "linux", "solaris", "windows"]),
        );
        for (name, _) in FEATURE_TOGGLES {
            schema.declare(*name, OptionDomain::Bool);
        }
        schema.declare("thread_threadapi", OptionDomain::one_of(&["winapi", "pthread"]));

        // Only the sub-libraries this version actually provides get an
        // option pair; the rest of the table is pruned away so supplying
        // them is an unknown-option error.
        for name in CONFIGURE_OPTIONS {
            if descriptor.contains(name) {
                schema.declare(format!("with_{}", name), OptionDomain::Bool);
                schema.declare(format!("without_{}", name), OptionDomain::Bool);
            }
        }

        Ok(schema)
    }

    fn source(&self, version: &str) -> Result<SourceSpec, ConfigError> {
        match version {
            "1.88.0" => Ok(SourceSpec::archive(
                "https://archives.boost.io/release/1.88.0/source/boost_1_88_0.tar.gz",
                "3621533e820dcab1e8012afd583c0c73cf0f77694952b81352bf38c1488f9cb4",
                "boost_1_88_0",
            )),
            "1.89.0" => Ok(SourceSpec::archive(
                "https://archives.boost.io/release/1.89.0/source/boost_1_89_0.tar.gz",
                "9de758db755e8330a01d995b0a730b1da32f2d4270b3b89a8f38b5d0e8d0e2e3",
                "boost_1_89_0",
            )),
            _ => Err(unknown_version("boost", version)),
        }
    }

    fn requirements(&self, ctx: &RecipeContext) -> Vec<Requirement> {
        let mut reqs = Vec::new();
        if ctx.options.is_true("iostreams_zlib") {
            reqs.push(Requirement::new("zlib", ">=1.3.1"));
        }
        if ctx.options.is_true("iostreams_bzip2") {
            reqs.push(Requirement::new("bzip2", "=1.0.8"));
        }
        if ctx.options.is_true("iostreams_lzma") {
            reqs.push(Requirement::new("xz_utils", ">=5.8.2"));
        }
        if ctx.options.is_true("iostreams_zstd") {
            reqs.push(Requirement::new("zstd", ">=1.5.7"));
        }
        if ctx.options.is_true("locale_icu") {
            reqs.push(Requirement::new("icu", ">=77.1"));
        }
        if ctx.options.is_true("locale_iconv") {
            reqs.push(Requirement::new("libiconv", ">=1.18"));
        }
        if ctx.options.is_true("stacktrace_backtrace") {
            reqs.push(Requirement::new("libbacktrace", "*").transitive());
        }
        reqs
    }

    /// Cross-check the requested python version against the interpreter
    /// that will actually be used.
    fn validate(&self, ctx: &RecipeContext, _source_dir: &Path) -> Result<()> {
        if !ctx.options.is_true("with_python") {
            return Ok(());
        }

        let executable = python_executable(ctx)?;
        let detected = detect_python_version(&executable);

        if let Some(requested) = ctx.options.get_str("python_version") {
            if detected.as_deref() != Some(requested) {
                return Err(ConfigError::InvalidConfiguration(format!(
                    "detected python version {} doesn't match requested python_version {}",
                    detected.as_deref().unwrap_or("(none)"),
                    requested
                ))
                .into());
            }
        } else if detected.is_none() {
            return Err(ConfigError::InvalidConfiguration(format!(
                "with_python is set but `{}` did not report a usable version",
                executable.display()
            ))
            .into());
        }

        Ok(())
    }

    fn build_config(&self, ctx: &RecipeContext) -> Result<BuildConfig> {
        let descriptor = Self::descriptor_for(ctx)?;
        let mut config = BuildConfig::default();

        // Preprocessor definitions.
        if ctx.options.is_true("asio_no_deprecated") {
            config.definitions.set("BOOST_ASIO_NO_DEPRECATED", "1");
        }
        if ctx.options.is_true("filesystem_no_deprecated") {
            config.definitions.set("BOOST_FILESYSTEM_NO_DEPRECATED", "1");
        }
        if ctx.options.is_true("system_use_utf8") {
            config.definitions.set("BOOST_SYSTEM_USE_UTF8", "1");
        }
        if let Some(version) = ctx.options.get_str("filesystem_version") {
            config.definitions.set("BOOST_FILESYSTEM_VERSION", version);
        }

        // Cache variables.
        let vars = &mut config.variables;
        shared_fpic_flags(ctx, vars);

        if let Some(runtime) = ctx.options.get_str("runtime") {
            vars.set("BOOST_RUNTIME_LINK", runtime);
        }
        if ctx.options.is_true("use_modules") {
            vars.set_bool("BOOST_USE_MODULES", true);
        }
        if let Some(std_fs) = ctx.options.get_bool("filesystem_use_std_fs") {
            vars.set_bool("BOOST_DLL_USE_STD_FS", std_fs);
        }
        if let Some(layout) = ctx.options.get_str("layout") {
            vars.set("BOOST_INSTALL_LAYOUT", layout);
        }
        if let Some(visibility) = ctx.options.get_str("visibility") {
            vars.set("CMAKE_CXX_VISIBILITY_PRESET", visibility);
            vars.set("CMAKE_C_VISIBILITY_PRESET", visibility);
            vars.set_bool("CMAKE_VISIBILITY_INLINES_HIDDEN", visibility == "default");
        }

        for (option, variable, _) in CONTEXT_OPTIONS {
            if let Some(value) = ctx.options.get_str(option) {
                vars.set(*variable, value);
            }
        }
        if let Some(target_os) = ctx.options.get_str("fiber_numa_target_os") {
            vars.set("BOOST_FIBER_NUMA_TARGET_OS", target_os);
        }
        for (option, variable) in FEATURE_TOGGLES {
            if let Some(enabled) = ctx.options.get_bool(option) {
                vars.set_bool(*variable, enabled);
            }
        }
        if let Some(api) = ctx.options.get_str("thread_threadapi") {
            vars.set("BOOST_THREAD_THREADAPI", api);
        }

        if let Some(python) = ctx.options.get_bool("with_python") {
            vars.set_bool("BOOST_ENABLE_PYTHON", python);
            if !python {
                if let Ok(executable) = python_executable(ctx) {
                    if let Some(root) = executable.parent() {
                        vars.set("Python_ROOT_DIR", root.display().to_string());
                    }
                }
            }
        }

        // Aggregate include/exclude lists, in descriptor order. A
        // sub-library that is both enabled and disabled is contradictory
        // input and is rejected outright.
        let mut include = Vec::new();
        let mut exclude = Vec::new();
        for name in descriptor.libraries() {
            let with = ctx.options.is_true(&format!("with_{}", name));
            let without = ctx.options.is_true(&format!("without_{}", name));
            if with && without {
                return Err(ConfigError::InvalidConfiguration(format!(
                    "boost sub-library `{}` is both enabled (with_{0}) and disabled (without_{0})",
                    name
                ))
                .into());
            }
            if with {
                include.push(name.as_str());
            }
            if without {
                exclude.push(name.as_str());
            }
        }
        vars.set_list("BOOST_INCLUDE_LIBRARIES", include);
        vars.set_list("BOOST_EXCLUDE_LIBRARIES", exclude);

        Ok(config)
    }
}

/// The python interpreter the build would use: the `python_executable`
/// option if set, otherwise the first interpreter on PATH.
fn python_executable(ctx: &RecipeContext) -> Result<PathBuf, ConfigError> {
    if let Some(exe) = ctx.options.get_str("python_executable") {
        return Ok(PathBuf::from(exe.replace('\\', "/")));
    }
    find_python().ok_or_else(|| ConfigError::ToolNotFound {
        tool: "python".to_string(),
        hint: "Building boost.python requires a python interpreter on PATH, or set the \
               python_executable option."
            .to_string(),
    })
}

/// Ask an interpreter for its `major.minor` version. `None` when the
/// interpreter cannot be run or prints nothing usable.
fn detect_python_version(executable: &Path) -> Option<String> {
    let output = ProcessBuilder::new(executable)
        .arg("-c")
        .arg("import sys; print('{}.{}'.format(sys.version_info[0], sys.version_info[1]))")
        .exec()
        .ok()?;
    if !output.status.success() {
        tracing::info!("python version detection failed");
        return None;
    }
    let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if version.is_empty() || version == "None" {
        None
    } else {
        Some(version)
    }
}
