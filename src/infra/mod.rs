pub mod azure;
pub mod git;
pub mod github;
pub mod gitlab;
pub mod http;
pub mod validator;
