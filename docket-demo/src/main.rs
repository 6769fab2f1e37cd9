use std::{
    io::{self, Write as _},
    sync::Arc,
};

use docket::{CommandFactory, FactoryConfig, printers};

#[derive(Debug, Clone)]
struct Context {
    app: &'static str,
}

struct Site {
    region: String,
}

#[docket::command_file]
impl Site {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
        }
    }

    /// Deploy the current build.
    ///
    /// Uploads the build to every host in the target environment, then
    /// restarts the services there. Hosts listed after the target are
    /// skipped.
    #[docket(alias = "d", alias = "ship")]
    #[docket(usage(example = "deploy prod --force", description = "Deploy without checks"))]
    pub fn deploy(
        &self,
        #[docket(help = "Environment to deploy to")] _target: String,
        #[docket(default = 1, help = "Number of parallel uploads")] _jobs: u32,
        #[docket(help = "Hosts to skip")] _skip: Vec<String>,
        #[docket(option, short, help = "Skip the pre-deploy checks")] _force: bool,
        #[docket(option, default = "text", help = "Report format")] _format: String,
    ) {
    }

    /// Show the state of the deployed site.
    pub fn status(&self, #[docket(option, short = 'e')] _environment: Option<String>) {}

    /// Accessors aren't commands.
    pub fn get_status(&self) -> &str {
        &self.region
    }

    pub fn set_region(&mut self, region: String) {
        self.region = region;
    }

    /// Prepare a fresh environment.
    pub fn setup(&self, #[docket(default = ["web", "worker"])] _roles: Vec<String>) {}

    #[docket(skip)]
    pub fn internal(&self) {}
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let site = Arc::new(Site::new("eu-west"));
    let factory = CommandFactory::with_config(FactoryConfig::default().validate(true));
    let commands = factory.build_with(&site, Context { app: "site" })?;

    log::info!(
        "built {} commands for {} in {}",
        commands.len(),
        commands
            .first()
            .map_or("nothing", |command| command.pass_through().app),
        site.get_status(),
    );

    let mut out = io::stdout().lock();
    printers::print_command_list(&mut out, &commands)?;

    for command in &commands {
        writeln!(out, "\n==> {}", command.name())?;
        printers::print_help(&mut out, command)?;
    }

    Ok(())
}
