//! GitHub simulation and canned repository data.

use base64::{engine::general_purpose::STANDARD, Engine};
use mockito::{Matcher, Mock, Server, ServerGuard};
use serde_json::{json, Value};

use crate::constant::{GITHUB_CLIENT_ID, GITHUB_TOKEN, GITHUB_USERNAME};

/// A repository as the GitHub simulation serves it.
#[derive(Debug, Clone)]
pub struct GitHubRepository {
    pub owner: String,
    pub name: String,
    pub default_branch: String,
    /// `(ref name, commit sha)`; names starting with `refs/tags/` are tags
    pub refs: Vec<(String, String)>,
    /// `(ref name, path, content)`; `None` makes the file answer 404
    pub files: Vec<(String, String, Option<String>)>,
    /// GitHub App installation; `None` makes the lookup answer 404
    pub installation_id: Option<i64>,
}

impl GitHubRepository {
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

/// `DockstoreTestUser2/hello-dockstore-workflow` with a valid CWL descriptor on
/// `master` and `1.0`, and no descriptor on `wdl-only`.
pub fn hello_dockstore_workflow() -> GitHubRepository {
    let cwl = workflow_cwl();

    GitHubRepository {
        owner: GITHUB_USERNAME.to_string(),
        name: "hello-dockstore-workflow".to_string(),
        default_branch: "master".to_string(),
        refs: vec![
            (
                "refs/heads/master".to_string(),
                "4f2c3e0b8a1d9c7e6f5a4b3c2d1e0f9a8b7c6d5e".to_string(),
            ),
            (
                "refs/heads/wdl-only".to_string(),
                "0e1d2c3b4a5f6e7d8c9b0a1f2e3d4c5b6a7f8e9d".to_string(),
            ),
            (
                "refs/tags/1.0".to_string(),
                "9a8b7c6d5e4f3a2b1c0d9e8f7a6b5c4d3e2f1a0b".to_string(),
            ),
        ],
        files: vec![
            (
                "master".to_string(),
                "/Dockstore.cwl".to_string(),
                Some(cwl.clone()),
            ),
            ("1.0".to_string(), "/Dockstore.cwl".to_string(), Some(cwl)),
            ("wdl-only".to_string(), "/Dockstore.cwl".to_string(), None),
        ],
        installation_id: Some(1_179_416),
    }
}

/// Workflow descriptor served for refreshed versions.
fn workflow_cwl() -> String {
    "cwlVersion: v1.0\n\
     class: Workflow\n\
     inputs:\n  \
       - id: input_file\n    type: File\n\
     outputs: []\n\
     steps: []\n"
        .to_string()
}

/// Stand-in for `api.github.com` and `github.com/login/oauth`.
pub struct GitHubSimulation {
    server: ServerGuard,
    mocks: Vec<Mock>,
}

impl GitHubSimulation {
    /// Starts an empty simulation; every request fails with 501 until rules are added.
    pub async fn start() -> Self {
        Self {
            server: Server::new_async().await,
            mocks: Vec::new(),
        }
    }

    /// Base URL to use in place of `https://api.github.com`.
    pub fn url(&self) -> String {
        self.server.url()
    }

    /// Direct access for rules not covered by the helpers.
    pub fn server(&mut self) -> &mut ServerGuard {
        &mut self.server
    }

    pub fn push(&mut self, mock: Mock) {
        self.mocks.push(mock);
    }

    fn authorized_get(&mut self, path: &str) -> Mock {
        self.server
            .mock("GET", path)
            .match_header("authorization", format!("Bearer {GITHUB_TOKEN}").as_str())
    }

    /// `GET /user` returning `login`.
    pub fn mock_user(&mut self, login: &str, expected_requests: usize) -> &mut Self {
        let body = json!({
            "login": login,
            "id": 17_859_829,
            "avatar_url": format!("https://avatars.githubusercontent.com/u/17859829?v=4&u={login}"),
            "type": "User",
        });

        let mock = self
            .authorized_get("/user")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .expect(expected_requests)
            .create();
        self.push(mock);
        self
    }

    /// `GET /user/orgs` returning one entry per login.
    pub fn mock_organizations(&mut self, logins: &[&str], expected_requests: usize) -> &mut Self {
        let body: Vec<Value> = logins
            .iter()
            .map(|login| json!({ "login": login, "url": format!("https://api.github.com/orgs/{login}") }))
            .collect();

        let mock = self
            .authorized_get("/user/orgs")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(Value::Array(body).to_string())
            .expect(expected_requests)
            .create();
        self.push(mock);
        self
    }

    /// `GET /user/repos` listing the given repositories.
    pub fn mock_user_repositories(
        &mut self,
        repositories: &[GitHubRepository],
        expected_requests: usize,
    ) -> &mut Self {
        let body: Vec<Value> = repositories.iter().map(repository_json).collect();

        let mock = self
            .authorized_get("/user/repos")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(Value::Array(body).to_string())
            .expect(expected_requests)
            .create();
        self.push(mock);
        self
    }

    /// Every endpoint a workflow refresh reads for `repository`.
    ///
    /// Registers the repository, its refs, each file and the App installation,
    /// each expected once per refresh.
    pub fn mock_repository(
        &mut self,
        repository: &GitHubRepository,
        expected_refreshes: usize,
    ) -> &mut Self {
        let base = format!("/repos/{}", repository.full_name());

        let mock = self
            .authorized_get(&base)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(repository_json(repository).to_string())
            .expect(expected_refreshes)
            .create();
        self.push(mock);

        let refs: Vec<Value> = repository
            .refs
            .iter()
            .map(|(name, sha)| {
                json!({
                    "ref": name,
                    "object": { "sha": sha, "type": "commit" },
                })
            })
            .collect();
        let mock = self
            .authorized_get(&format!("{base}/git/refs"))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(Value::Array(refs).to_string())
            .expect(expected_refreshes)
            .create();
        self.push(mock);

        for (reference, path, content) in &repository.files {
            let url = format!("{base}/contents/{}", path.trim_start_matches('/'));
            let mock = self
                .authorized_get(&url)
                .match_query(Matcher::UrlEncoded("ref".into(), reference.clone()));
            let mock = match content {
                Some(content) => mock.with_status(200).with_body(
                    json!({
                        "type": "file",
                        "path": path.trim_start_matches('/'),
                        "encoding": "base64",
                        "content": STANDARD.encode(content),
                    })
                    .to_string(),
                ),
                None => mock.with_status(404).with_body(not_found().to_string()),
            };
            let mock = mock
                .with_header("content-type", "application/json")
                .expect(expected_refreshes)
                .create();
            self.push(mock);
        }

        let mock = self.authorized_get(&format!("{base}/installation"));
        let mock = match repository.installation_id {
            Some(id) => mock
                .with_status(200)
                .with_body(json!({ "id": id, "app_id": 40_675 }).to_string()),
            None => mock.with_status(404).with_body(not_found().to_string()),
        };
        let mock = mock
            .with_header("content-type", "application/json")
            .expect(expected_refreshes)
            .create();
        self.push(mock);

        self
    }

    /// `POST /login/oauth/access_token` exchanging `code` for the fixture token.
    pub fn mock_token_exchange(&mut self, code: &str, expected_requests: usize) -> &mut Self {
        let mock = self
            .server
            .mock("POST", "/login/oauth/access_token")
            .match_header("accept", "application/json")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("code".into(), code.into()),
                Matcher::UrlEncoded("client_id".into(), GITHUB_CLIENT_ID.into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "access_token": GITHUB_TOKEN,
                    "token_type": "bearer",
                    "scope": "read:org,user:email",
                })
                .to_string(),
            )
            .expect(expected_requests)
            .create();
        self.push(mock);
        self
    }

    /// Panics unless every rule was hit the expected number of times.
    pub fn assert_mocks(&self) {
        for mock in &self.mocks {
            mock.assert();
        }
    }
}

fn repository_json(repository: &GitHubRepository) -> Value {
    json!({
        "name": repository.name,
        "full_name": repository.full_name(),
        "owner": { "login": repository.owner },
        "private": false,
        "default_branch": repository.default_branch,
    })
}

fn not_found() -> Value {
    json!({
        "message": "Not Found",
        "documentation_url": "https://docs.github.com/rest",
    })
}
