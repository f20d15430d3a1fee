//! Serve command handler

use crate::config::settings::Settings;
use crate::error::AppResult;
use crate::server::Server;

pub struct ServeCommandHandler {
    config: Settings,
}

impl ServeCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Starts the server, or only reports the effective configuration when
    /// `dry_run` is set.
    ///
    /// # Errors
    /// - Configuration validation errors
    /// - Migration, pool, bind or runtime errors from the server
    pub async fn execute(self, dry_run: bool) -> AppResult<()> {
        self.config.validate()?;

        if dry_run {
            self.print_summary();
            return Ok(());
        }

        Server::new(self.config).run().await?;
        Ok(())
    }

    fn print_summary(&self) {
        let settings = &self.config;
        println!("✓ Configuration is valid");
        println!("✓ Server would bind to: {}", settings.server.address());
        println!(
            "✓ Database pool: {}..{} connections, auto_migrate = {}",
            settings.database.min_connections,
            settings.database.max_connections,
            settings.database.auto_migrate
        );
        println!(
            "✓ Logger: level = {}, console = {}, file = {}",
            settings.logger.level, settings.logger.console.enabled, settings.logger.file.enabled
        );
        println!("Dry run completed successfully");
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}
