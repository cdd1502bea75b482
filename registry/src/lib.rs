use std::sync::Arc;

use adapter::{
    database::ConnectionPool,
    repository::{
        book::BookRepositoryImpl, health::HealthCheckRepositoryImpl, loan::LoanRepositoryImpl,
        reader::ReaderRepositoryImpl,
    },
};
use kernel::{
    clock::{Clock, SystemClock},
    repository::{
        book::BookRepository, health::HealthCheckRepository, loan::LoanRepository,
        reader::ReaderRepository,
    },
};

// DI コンテナ。リポジトリの実装をここで束ねて handler へ渡す
#[derive(Clone)]
pub struct AppRegistryImpl {
    book_repository: Arc<dyn BookRepository>,
    reader_repository: Arc<dyn ReaderRepository>,
    loan_repository: Arc<dyn LoanRepository>,
    health_check_repository: Arc<dyn HealthCheckRepository>,
    clock: Arc<dyn Clock>,
}

impl AppRegistryImpl {
    pub fn new(pool: ConnectionPool) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let book_repository = Arc::new(BookRepositoryImpl::new(pool.clone()));
        let reader_repository = Arc::new(ReaderRepositoryImpl::new(pool.clone()));
        let loan_repository = Arc::new(LoanRepositoryImpl::new(pool.clone(), clock.clone()));
        let health_check_repository = Arc::new(HealthCheckRepositoryImpl::new(pool.clone()));
        Self {
            book_repository,
            reader_repository,
            loan_repository,
            health_check_repository,
            clock,
        }
    }
}

// handler からはこの trait 越しにアクセスする。テストではモック実装に差し替える
#[mockall::automock]
pub trait AppRegistryExt {
    fn book_repository(&self) -> Arc<dyn BookRepository>;
    fn reader_repository(&self) -> Arc<dyn ReaderRepository>;
    fn loan_repository(&self) -> Arc<dyn LoanRepository>;
    fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository>;
    fn clock(&self) -> Arc<dyn Clock>;
}

impl AppRegistryExt for AppRegistryImpl {
    fn book_repository(&self) -> Arc<dyn BookRepository> {
        self.book_repository.clone()
    }

    fn reader_repository(&self) -> Arc<dyn ReaderRepository> {
        self.reader_repository.clone()
    }

    fn loan_repository(&self) -> Arc<dyn LoanRepository> {
        self.loan_repository.clone()
    }

    fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    fn clock(&self) -> Arc<dyn Clock> {
        self.clock.clone()
    }
}

pub type AppRegistry = Arc<dyn AppRegistryExt + Send + Sync + 'static>;
