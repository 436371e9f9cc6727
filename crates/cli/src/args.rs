use clap::Parser;
use kintone_gen_core::GeneratorPaths;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "kintone-gen",
    version,
    about = "Generate the kintone PHP client from the vendored OpenAPI specification"
)]
pub struct Args {
    #[arg(
        value_name = "PROJECT_ROOT",
        help = "The project root. Defaults to current working directory"
    )]
    pub project_root: Option<PathBuf>,
    #[arg(
        long = "spec-dir",
        value_name = "PATH",
        help = "Specification root containing kintone/<version>/, relative to the project root [default: rest-api-spec]"
    )]
    pub spec_dir: Option<PathBuf>,
    #[arg(
        long = "output-dir",
        value_name = "PATH",
        help = "Directory the client sources are written to, relative to the project root [default: src]"
    )]
    pub output_dir: Option<PathBuf>,
    #[arg(
        long = "temp-dir",
        value_name = "PATH",
        help = "Staging directory for the generator, relative to the project root [default: temp]"
    )]
    pub temp_dir: Option<PathBuf>,
}

impl Args {
    pub fn paths(&self) -> GeneratorPaths {
        let project_root = self
            .project_root
            .clone()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

        let mut paths = GeneratorPaths::from_project_root(project_root);
        if let Some(spec_dir) = &self.spec_dir {
            paths = paths.with_spec_root(spec_dir);
        }
        if let Some(output_dir) = &self.output_dir {
            paths = paths.with_output_dir(output_dir);
        }
        if let Some(temp_dir) = &self.temp_dir {
            paths = paths.with_temp_dir(temp_dir);
        }
        paths
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults_under_project_root() {
        let args = Args::try_parse_from(["kintone-gen", "/work/client"]).unwrap();
        let paths = args.paths();
        assert_eq!(paths.project_root, PathBuf::from("/work/client"));
        assert_eq!(paths.spec_root, PathBuf::from("/work/client/rest-api-spec"));
        assert_eq!(paths.output_dir, PathBuf::from("/work/client/src"));
        assert_eq!(paths.temp_dir, PathBuf::from("/work/client/temp"));
    }

    #[test]
    fn test_overrides() {
        let args = Args::try_parse_from([
            "kintone-gen",
            "/work/client",
            "--spec-dir",
            "vendor/spec",
            "--output-dir",
            "lib",
            "--temp-dir",
            "/tmp/kintone-gen",
        ])
        .unwrap();
        let paths = args.paths();
        assert_eq!(paths.spec_root, PathBuf::from("/work/client/vendor/spec"));
        assert_eq!(paths.versions_dir(), PathBuf::from("/work/client/vendor/spec/kintone"));
        assert_eq!(paths.output_dir, PathBuf::from("/work/client/lib"));
        assert_eq!(paths.temp_dir, PathBuf::from("/tmp/kintone-gen"));
    }

    #[test]
    fn test_project_root_defaults_to_cwd() {
        let args = Args::try_parse_from(["kintone-gen"]).unwrap();
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(args.paths().output_dir, cwd.join("src"));
    }
}
