//! Fixed test fixtures for deterministic tests.

use uuid::Uuid;

// Signing secrets
pub const TEST_JWT_SECRET: &str = "test-jwt-secret-do-not-use-in-production";
pub const OTHER_JWT_SECRET: &str = "some-other-deployment-secret";

// Accounts
pub const TEST_USER_ALICE: &str = "alice";
pub const TEST_USER_BOB: &str = "bob";
pub const TEST_ADMIN_ROOT: &str = "root";
pub const TEST_PASSWORD: &str = "correct-horse-battery-staple";

// Roles
pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";

// Task ids that are never created
pub const MISSING_TASK_ID: Uuid = Uuid::from_u128(404);

// Bcrypt's minimum cost keeps test logins fast
pub const TEST_BCRYPT_COST: &str = "4";
