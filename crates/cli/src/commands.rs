use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Render one query and print the SQL
    Render {
        #[arg(long, help = "Query id, e.g. User.findAll")]
        query: String,

        #[arg(long, help = "Mapper directory, overrides QUARRY_MAP_PATH")]
        maps: Option<PathBuf>,

        #[arg(
            short,
            long = "param",
            value_name = "NAME=VALUE",
            help = "Parameter passed to the template, may be repeated"
        )]
        params: Vec<String>,

        #[arg(long, help = "JSON object file with parameters, merged under --param")]
        params_file: Option<PathBuf>,

        #[arg(long, help = "Print the query id, statement kind and SQL as JSON")]
        json: bool,
    },
    /// List the statements of a mapper file
    List {
        #[arg(long, help = "Mapper file base name, e.g. User")]
        file: String,

        #[arg(long, help = "Mapper directory, overrides QUARRY_MAP_PATH")]
        maps: Option<PathBuf>,
    },
    /// Parse every mapper file and report problems
    Check {
        #[arg(long, help = "Mapper directory, overrides QUARRY_MAP_PATH")]
        maps: Option<PathBuf>,

        #[arg(long, help = "If set, prints the report as JSON instead of text")]
        json: bool,
    },
    /// Print the parsed document of a mapper file as JSON
    Ast {
        #[arg(long, help = "Mapper file base name, e.g. User")]
        file: String,

        #[arg(long, help = "Mapper directory, overrides QUARRY_MAP_PATH")]
        maps: Option<PathBuf>,
    },
}

impl Commands {
    pub fn maps(&self) -> Option<&PathBuf> {
        match self {
            Commands::Render { maps, .. }
            | Commands::List { maps, .. }
            | Commands::Check { maps, .. }
            | Commands::Ast { maps, .. } => maps.as_ref(),
        }
    }
}
