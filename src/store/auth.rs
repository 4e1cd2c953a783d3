use tracing::{info, warn};

use super::Store;
use crate::error::AppError;
use crate::models::session::Session;
use crate::notify::Notification;
use crate::storage::StorageKey;

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin";

impl Store {
    /// Returns `Ok(false)` on bad credentials; the session is left as it was.
    pub fn admin_login(&mut self, username: &str, password: &str) -> Result<bool, AppError> {
        if username != ADMIN_USERNAME || password != ADMIN_PASSWORD {
            self.metrics.record_auth("admin", false);
            warn!(username, "admin login rejected");
            self.notifier.notify(Notification::error(
                "Erro de Login Admin",
                "Usuário ou senha incorretos.",
            ));
            return Ok(false);
        }

        self.storage.save(StorageKey::IsAuthenticated, "true")?;
        self.storage.clear(StorageKey::AuthenticatedDriver)?;
        self.session = Session::Admin;

        self.metrics.record_auth("admin", true);
        info!("admin session started");
        self.notifier.notify(Notification::info(
            "Login Admin bem-sucedido!",
            "Bem-vindo ao painel de Admin.",
        ));
        Ok(true)
    }

    pub fn admin_logout(&mut self) -> Result<(), AppError> {
        self.storage.clear(StorageKey::IsAuthenticated)?;
        if self.session.is_admin() {
            self.session = Session::Anonymous;
        }

        info!("admin session ended");
        self.notifier.notify(Notification::info(
            "Logout Admin realizado",
            "Você foi desconectado do painel de Admin.",
        ));
        Ok(())
    }

    /// Exact, case-sensitive match on both username and password.
    pub fn driver_login(&mut self, username: &str, password: &str) -> Result<bool, AppError> {
        let matched = self
            .drivers
            .iter()
            .find(|driver| driver.username == username && driver.password == password)
            .cloned();

        let Some(driver) = matched else {
            self.metrics.record_auth("driver", false);
            warn!(username, "driver login rejected");
            self.notifier.notify(Notification::error(
                "Erro de Login Motorista",
                "Usuário ou senha incorretos.",
            ));
            return Ok(false);
        };

        self.storage.save(
            StorageKey::AuthenticatedDriver,
            &serde_json::to_string(&driver)?,
        )?;
        self.storage.clear(StorageKey::IsAuthenticated)?;

        self.metrics.record_auth("driver", true);
        info!(driver_id = %driver.id, "driver session started");
        self.notifier.notify(Notification::info(
            "Login Motorista bem-sucedido!",
            format!("Bem-vindo, {}.", driver.name),
        ));
        self.session = Session::Driver(driver);
        Ok(true)
    }

    pub fn driver_logout(&mut self) -> Result<(), AppError> {
        self.storage.clear(StorageKey::AuthenticatedDriver)?;
        if let Session::Driver(driver) = &self.session {
            info!(driver_id = %driver.id, "driver session ended");
            self.session = Session::Anonymous;
        }

        self.notifier.notify(Notification::info(
            "Logout Motorista realizado",
            "Você foi desconectado.",
        ));
        Ok(())
    }
}
