mod exec_log;
pub use exec_log::ExecLog;

mod logging_session;
pub use logging_session::{LoggingSession, SessionOp};

use cassette::{CqlIdentifier, MappingContext, MappingConverter, Template};
use cassette_driver_memory::MemorySession;

use std::sync::{Arc, Once};

pub use std_util::*;

/// Keyspace every test template works in
pub const KEYSPACE: &str = "test";

/// A template over a fresh in-memory session with the test keyspace created.
pub struct TemplateTest {
    pub template: Template,

    /// The store behind the template, for inspecting tables directly
    pub session: Arc<MemorySession>,

    log: ExecLog,
}

impl TemplateTest {
    pub async fn new() -> Self {
        Self::with_context(Arc::new(MappingContext::new())).await
    }

    pub async fn with_context(context: Arc<MappingContext>) -> Self {
        init_tracing();

        let keyspace = keyspace();
        let session = Arc::new(MemorySession::with_keyspace(keyspace.clone()));
        let logging = LoggingSession::new(session.clone());
        let log = ExecLog::new(logging.log_handle());

        let template = Template::new(Arc::new(logging), MappingConverter::new(context))
            .with_keyspace(keyspace);
        template.create_keyspace(1).await.unwrap();

        Self {
            template,
            session,
            log,
        }
    }

    /// Statements executed so far, including keyspace creation
    pub fn log(&mut self) -> &mut ExecLog {
        &mut self.log
    }

    /// Names of the tables currently in the test keyspace
    pub fn table_names(&self) -> Vec<String> {
        self.session
            .table_names(&keyspace())
            .iter()
            .map(CqlIdentifier::to_cql)
            .collect()
    }

    pub fn row_count(&self, table: &str) -> Option<usize> {
        let table = CqlIdentifier::parse(table).unwrap();
        self.session.row_count(&keyspace(), &table)
    }
}

pub fn keyspace() -> CqlIdentifier {
    CqlIdentifier::unquoted(KEYSPACE).unwrap()
}

/// Installs a fmt subscriber honoring `RUST_LOG`, once per test binary.
pub fn init_tracing() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}
