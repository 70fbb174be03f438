#[derive(Debug, Clone)]
pub enum Message {
    // === PROBLEM MESSAGES ===
    ProblemCreated(i64),
    ProblemUpdated(i64),
    ProblemDeleted(i64),
    ProblemNotFound(i64),
    ProblemAlreadyAbsent(i64),
    ProblemsHeader(usize),
    ProblemHeader(i64, String),
    NoProblemsFound,
    NoFieldsToUpdate,
    ConfirmDeleteProblem(i64, String),
    OrphanCategoryId(i64),

    // === UPDATE (NOTE) MESSAGES ===
    UpdateAdded(i64),
    UpdatesHeader(usize),
    NoUpdatesYet,

    // === CATEGORY MESSAGES ===
    CategoriesHeader,
    NoCategoriesFound,
    CategoryCreated(String),
    CategoryDeleted(String),
    CategoryNotFound(String),
    CategoryAlreadyExists(String),
    ConfirmDeleteCategory(String),
    CategoryStillReferenced(String, usize),
    CategoriesSeeded(usize),

    // === STATISTICS MESSAGES ===
    StatisticsHeader,
    StatusDistributionHeader,
    PriorityDistributionHeader,
    RecentIssuesHeader,

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDeleted,
    ConfigFileNotFound,
    ConfigModuleDatabase,
    ConfigModuleDefaults,
    SelectConfigModules,
    PromptDatabasePath,
    PromptDefaultReporter,
    PromptDefaultPriority,
    InvalidPriority(String),

    // === MIGRATION MESSAGES ===
    MigrationsFound(usize),
    RunningMigration(u32, String),
    MigrationCompleted(u32),
    MigrationFailed(u32, String),
    AllMigrationsCompleted,
    DatabaseOpened(String),
    DatabaseVersion(u32),
    DatabaseUpToDate,
    DatabaseNeedsUpdate,
    MigrationHistory,
    DatabaseMissing(String),

    // === EXPORT MESSAGES ===
    ExportCompleted(String, usize),

    // === GENERIC MESSAGES ===
    OperationCancelled,
}
