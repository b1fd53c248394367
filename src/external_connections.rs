use sqlx::SqliteConnection;

/// A handle to an active database connection which can be lent out to driven adapters
pub trait ConnectionHandle {
    fn borrow_connection(&mut self) -> &mut SqliteConnection;
}

/// Provides access to the systems business logic needs to talk to, so driven adapters
/// don't have to know where their connections come from.
pub trait ExternalConnectivity: Sync {
    type DbHandle<'cxn_borrow>: ConnectionHandle + Send
    where
        Self: 'cxn_borrow;

    async fn database_cxn(&mut self) -> Result<Self::DbHandle<'_>, anyhow::Error>;
}
