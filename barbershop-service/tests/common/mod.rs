use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use auth::HashingCost;
use auth::PasswordHasher;
use barbershop_service::domain::account::errors::AccountError;
use barbershop_service::domain::account::models::Account;
use barbershop_service::domain::account::models::AccountFilter;
use barbershop_service::domain::account::models::AccountId;
use barbershop_service::domain::account::models::Role;
use barbershop_service::domain::account::ports::AccountRepository;
use barbershop_service::domain::account::service::AccountService;
use barbershop_service::domain::auth::errors::AuthError;
use barbershop_service::domain::auth::service::AuthService;
use barbershop_service::domain::barbershop::errors::BarbershopError;
use barbershop_service::domain::barbershop::models::Barbershop;
use barbershop_service::domain::barbershop::models::BarbershopId;
use barbershop_service::domain::barbershop::ports::BarbershopRepository;
use barbershop_service::domain::barbershop::service::BarbershopService;
use barbershop_service::domain::client::errors::ClientError;
use barbershop_service::domain::client::models::Client;
use barbershop_service::domain::client::models::ClientId;
use barbershop_service::domain::client::ports::ClientRepository;
use barbershop_service::domain::client::service::ClientService;
use barbershop_service::domain::dashboard::errors::DashboardError;
use barbershop_service::domain::dashboard::models::ActiveServiceSummary;
use barbershop_service::domain::dashboard::models::BarberSummary;
use barbershop_service::domain::dashboard::models::RecentClient;
use barbershop_service::domain::dashboard::ports::DashboardRepository;
use barbershop_service::domain::dashboard::service::DashboardService;
use barbershop_service::domain::offering::errors::OfferingError;
use barbershop_service::domain::offering::models::Offering;
use barbershop_service::domain::offering::models::OfferingId;
use barbershop_service::domain::offering::ports::OfferingRepository;
use barbershop_service::domain::offering::service::OfferingService;
use barbershop_service::inbound::http::router::create_router;
use barbershop_service::inbound::http::router::AppState;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde_json::json;
use serde_json::Value;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server over in-memory storage
pub struct TestApp {
    pub address: String,
    pub store: Arc<InMemoryStore>,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let store = Arc::new(InMemoryStore::default());

        // Cheapest accepted Argon2 parameters keep the suite fast.
        let password_hasher = PasswordHasher::with_cost(HashingCost {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        })
        .expect("Failed to build password hasher");

        let authenticator = Arc::new(
            Authenticator::new(JWT_SECRET, Duration::hours(24))
                .with_password_hasher(password_hasher.clone()),
        );

        let auth_service = Arc::new(AuthService::new(Arc::clone(&store), authenticator));

        let state = AppState {
            auth_service: auth_service.clone(),
            account_service: Arc::new(AccountService::new(Arc::clone(&store), password_hasher)),
            barbershop_service: Arc::new(BarbershopService::new(Arc::clone(&store), auth_service)),
            client_service: Arc::new(ClientService::new(Arc::clone(&store))),
            offering_service: Arc::new(OfferingService::new(Arc::clone(&store))),
            dashboard_service: Arc::new(DashboardService::new(Arc::clone(&store))),
        };

        let router = create_router(state);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            store,
            api_client: reqwest::Client::new(),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PATCH request with Bearer token
    pub fn patch_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .patch(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Self-register an account and return the response `data`.
    pub async fn register(&self, email: &str, password: &str, role: Option<&str>) -> Value {
        let response = self
            .post("/api/auth/register")
            .json(&json!({
                "email": email,
                "password": password,
                "name": "Test Person",
                "role": role,
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"].clone()
    }

    /// Log in and return the access token.
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .post("/api/auth/login")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"]["access_token"]
            .as_str()
            .expect("Missing access token")
            .to_string()
    }

    /// Register an account with `role` and log it in.
    pub async fn token_for(&self, email: &str, role: &str) -> String {
        self.register(email, "secret123", Some(role)).await;
        self.login(email, "secret123").await
    }

    /// Register a barbershop with a fresh owner; returns the owner's token
    /// and the barbershop id.
    pub async fn owner_with_barbershop(&self, email: &str, name: &str) -> (String, String) {
        let response = self
            .post("/api/barbershops/register")
            .json(&json!({
                "owner": { "email": email, "password": "secret123", "name": "Owner" },
                "barbershop": { "name": name, "address": "Main St 1" },
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        let body: Value = response.json().await.expect("Failed to parse response");
        let barbershop_id = body["data"]["barbershop"]["id"]
            .as_str()
            .expect("Missing barbershop id")
            .to_string();

        (self.login(email, "secret123").await, barbershop_id)
    }
}

#[derive(Default)]
struct Tables {
    accounts: Vec<Account>,
    barbershops: Vec<Barbershop>,
    clients: Vec<Client>,
    offerings: Vec<Offering>,
}

impl Tables {
    fn barbershop_exists(&self, id: BarbershopId) -> bool {
        self.barbershops.iter().any(|b| b.id == id)
    }

    fn email_taken(&self, email: &str, except: Option<AccountId>) -> bool {
        self.accounts
            .iter()
            .any(|a| a.email.as_str() == email && Some(a.id) != except)
    }
}

/// Storage double honouring the same integrity rules as the migrations:
/// unique emails, foreign keys, cascades and `SET NULL` unlinking.
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn account_count(&self) -> usize {
        self.tables.lock().unwrap().accounts.len()
    }

    pub fn barbershop_count(&self) -> usize {
        self.tables.lock().unwrap().barbershops.len()
    }
}

#[async_trait]
impl AccountRepository for InMemoryStore {
    async fn create(&self, account: Account) -> Result<Account, AccountError> {
        let mut tables = self.tables.lock().unwrap();

        if tables.email_taken(account.email.as_str(), None) {
            return Err(AccountError::EmailAlreadyExists(account.email.to_string()));
        }
        if let Some(id) = account.barbershop_id {
            if !tables.barbershop_exists(id) {
                return Err(AccountError::BarbershopNotFound(id.to_string()));
            }
        }

        tables.accounts.push(account.clone());
        Ok(account)
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.accounts.iter().find(|a| a.id == *id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .accounts
            .iter()
            .find(|a| a.email.as_str() == email)
            .cloned())
    }

    async fn list(&self, filter: &AccountFilter) -> Result<Vec<Account>, AccountError> {
        let tables = self.tables.lock().unwrap();
        let mut accounts: Vec<Account> = tables
            .accounts
            .iter()
            .filter(|a| filter.matches(a))
            .cloned()
            .collect();
        accounts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(accounts)
    }

    async fn update(&self, account: Account) -> Result<Account, AccountError> {
        let mut tables = self.tables.lock().unwrap();

        if tables.email_taken(account.email.as_str(), Some(account.id)) {
            return Err(AccountError::EmailAlreadyExists(account.email.to_string()));
        }
        if let Some(id) = account.barbershop_id {
            if !tables.barbershop_exists(id) {
                return Err(AccountError::BarbershopNotFound(id.to_string()));
            }
        }

        let slot = tables
            .accounts
            .iter_mut()
            .find(|a| a.id == account.id)
            .ok_or_else(|| AccountError::NotFound(account.id.to_string()))?;
        *slot = account.clone();
        Ok(account)
    }

    async fn delete(&self, id: &AccountId) -> Result<(), AccountError> {
        let mut tables = self.tables.lock().unwrap();

        if tables.barbershops.iter().any(|b| b.owner_id == *id) {
            return Err(AccountError::StillOwnsBarbershop(id.to_string()));
        }

        let before = tables.accounts.len();
        tables.accounts.retain(|a| a.id != *id);
        if tables.accounts.len() == before {
            return Err(AccountError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl BarbershopRepository for InMemoryStore {
    async fn create_with_owner(
        &self,
        mut owner: Account,
        barbershop: Barbershop,
    ) -> Result<(Account, Barbershop), BarbershopError> {
        let mut tables = self.tables.lock().unwrap();

        if tables.email_taken(owner.email.as_str(), None) {
            return Err(BarbershopError::Registration(AuthError::DuplicateEmail(
                owner.email.to_string(),
            )));
        }

        owner.barbershop_id = Some(barbershop.id);
        tables.accounts.push(owner.clone());
        tables.barbershops.push(barbershop.clone());

        Ok((owner, barbershop))
    }

    async fn create(&self, barbershop: Barbershop) -> Result<Barbershop, BarbershopError> {
        let mut tables = self.tables.lock().unwrap();

        if !tables.accounts.iter().any(|a| a.id == barbershop.owner_id) {
            return Err(BarbershopError::OwnerNotFound(barbershop.owner_id.to_string()));
        }

        tables.barbershops.push(barbershop.clone());
        Ok(barbershop)
    }

    async fn find_by_id(&self, id: &BarbershopId) -> Result<Option<Barbershop>, BarbershopError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.barbershops.iter().find(|b| b.id == *id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Barbershop>, BarbershopError> {
        let tables = self.tables.lock().unwrap();
        let mut barbershops = tables.barbershops.clone();
        barbershops.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(barbershops)
    }

    async fn update(&self, barbershop: Barbershop) -> Result<Barbershop, BarbershopError> {
        let mut tables = self.tables.lock().unwrap();
        let slot = tables
            .barbershops
            .iter_mut()
            .find(|b| b.id == barbershop.id)
            .ok_or_else(|| BarbershopError::NotFound(barbershop.id.to_string()))?;
        *slot = barbershop.clone();
        Ok(barbershop)
    }

    async fn delete(&self, id: &BarbershopId) -> Result<(), BarbershopError> {
        let mut tables = self.tables.lock().unwrap();

        if !tables.barbershop_exists(*id) {
            return Err(BarbershopError::NotFound(id.to_string()));
        }

        tables.barbershops.retain(|b| b.id != *id);
        tables.clients.retain(|c| c.barbershop_id != *id);
        tables.offerings.retain(|o| o.barbershop_id != *id);
        for account in tables.accounts.iter_mut() {
            if account.barbershop_id == Some(*id) {
                account.barbershop_id = None;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl ClientRepository for InMemoryStore {
    async fn create(&self, client: Client) -> Result<Client, ClientError> {
        let mut tables = self.tables.lock().unwrap();

        if !tables.barbershop_exists(client.barbershop_id) {
            return Err(ClientError::BarbershopNotFound(client.barbershop_id.to_string()));
        }

        tables.clients.push(client.clone());
        Ok(client)
    }

    async fn find_by_id(
        &self,
        barbershop_id: BarbershopId,
        id: &ClientId,
    ) -> Result<Option<Client>, ClientError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .clients
            .iter()
            .find(|c| c.id == *id && c.barbershop_id == barbershop_id)
            .cloned())
    }

    async fn list(&self, barbershop_id: BarbershopId) -> Result<Vec<Client>, ClientError> {
        let tables = self.tables.lock().unwrap();
        let mut clients: Vec<Client> = tables
            .clients
            .iter()
            .filter(|c| c.barbershop_id == barbershop_id)
            .cloned()
            .collect();
        clients.sort_by(|a, b| (&a.name, &a.lastname).cmp(&(&b.name, &b.lastname)));
        Ok(clients)
    }

    async fn find_by_phone(
        &self,
        barbershop_id: BarbershopId,
        phone: &str,
    ) -> Result<Option<Client>, ClientError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .clients
            .iter()
            .find(|c| c.barbershop_id == barbershop_id && c.phone == phone)
            .cloned())
    }

    async fn find_by_email(
        &self,
        barbershop_id: BarbershopId,
        email: &str,
    ) -> Result<Option<Client>, ClientError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .clients
            .iter()
            .find(|c| {
                c.barbershop_id == barbershop_id
                    && c.email.as_ref().is_some_and(|e| e.as_str() == email)
            })
            .cloned())
    }

    async fn update(&self, client: Client) -> Result<Client, ClientError> {
        let mut tables = self.tables.lock().unwrap();
        let slot = tables
            .clients
            .iter_mut()
            .find(|c| c.id == client.id && c.barbershop_id == client.barbershop_id)
            .ok_or_else(|| ClientError::NotFound(client.id.to_string()))?;
        *slot = client.clone();
        Ok(client)
    }

    async fn delete(&self, barbershop_id: BarbershopId, id: &ClientId) -> Result<(), ClientError> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.clients.len();
        tables
            .clients
            .retain(|c| !(c.id == *id && c.barbershop_id == barbershop_id));
        if tables.clients.len() == before {
            return Err(ClientError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl OfferingRepository for InMemoryStore {
    async fn create(&self, offering: Offering) -> Result<Offering, OfferingError> {
        let mut tables = self.tables.lock().unwrap();

        if !tables.barbershop_exists(offering.barbershop_id) {
            return Err(OfferingError::BarbershopNotFound(
                offering.barbershop_id.to_string(),
            ));
        }

        tables.offerings.push(offering.clone());
        Ok(offering)
    }

    async fn find_by_id(&self, id: &OfferingId) -> Result<Option<Offering>, OfferingError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.offerings.iter().find(|o| o.id == *id).cloned())
    }

    async fn list(
        &self,
        barbershop_id: Option<BarbershopId>,
    ) -> Result<Vec<Offering>, OfferingError> {
        let tables = self.tables.lock().unwrap();
        let mut offerings: Vec<Offering> = tables
            .offerings
            .iter()
            .filter(|o| barbershop_id.map_or(true, |id| o.barbershop_id == id))
            .cloned()
            .collect();
        offerings.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(offerings)
    }

    async fn update(&self, offering: Offering) -> Result<Offering, OfferingError> {
        let mut tables = self.tables.lock().unwrap();
        let slot = tables
            .offerings
            .iter_mut()
            .find(|o| o.id == offering.id)
            .ok_or_else(|| OfferingError::NotFound(offering.id.to_string()))?;
        *slot = offering.clone();
        Ok(offering)
    }

    async fn delete(&self, id: &OfferingId) -> Result<(), OfferingError> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.offerings.len();
        tables.offerings.retain(|o| o.id != *id);
        if tables.offerings.len() == before {
            return Err(OfferingError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

fn is_active_barber(account: &Account, barbershop_id: BarbershopId) -> bool {
    account.role == Role::Barber
        && account.is_active
        && account.barbershop_id == Some(barbershop_id)
}

#[async_trait]
impl DashboardRepository for InMemoryStore {
    async fn count_clients(&self, barbershop_id: BarbershopId) -> Result<i64, DashboardError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .clients
            .iter()
            .filter(|c| c.barbershop_id == barbershop_id)
            .count() as i64)
    }

    async fn count_clients_since(
        &self,
        barbershop_id: BarbershopId,
        since: DateTime<Utc>,
    ) -> Result<i64, DashboardError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .clients
            .iter()
            .filter(|c| c.barbershop_id == barbershop_id && c.created_at >= since)
            .count() as i64)
    }

    async fn count_active_offerings(
        &self,
        barbershop_id: BarbershopId,
    ) -> Result<i64, DashboardError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .offerings
            .iter()
            .filter(|o| o.barbershop_id == barbershop_id && o.active)
            .count() as i64)
    }

    async fn count_barbers(&self, barbershop_id: BarbershopId) -> Result<i64, DashboardError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .accounts
            .iter()
            .filter(|a| is_active_barber(a, barbershop_id))
            .count() as i64)
    }

    async fn recent_clients(
        &self,
        barbershop_id: BarbershopId,
        limit: i64,
    ) -> Result<Vec<RecentClient>, DashboardError> {
        let tables = self.tables.lock().unwrap();
        let mut clients: Vec<&Client> = tables
            .clients
            .iter()
            .filter(|c| c.barbershop_id == barbershop_id)
            .collect();
        clients.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(clients
            .into_iter()
            .take(usize::try_from(limit).unwrap_or(0))
            .map(|c| RecentClient {
                id: c.id,
                name: c.name.clone(),
                lastname: c.lastname.clone(),
                created_at: c.created_at,
            })
            .collect())
    }

    async fn active_offerings(
        &self,
        barbershop_id: BarbershopId,
    ) -> Result<Vec<ActiveServiceSummary>, DashboardError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .offerings
            .iter()
            .filter(|o| o.barbershop_id == barbershop_id && o.active)
            .map(|o| ActiveServiceSummary {
                id: o.id,
                name: o.name.clone(),
                price_cents: o.price_cents,
            })
            .collect())
    }

    async fn barbers(
        &self,
        barbershop_id: BarbershopId,
    ) -> Result<Vec<BarberSummary>, DashboardError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .accounts
            .iter()
            .filter(|a| is_active_barber(a, barbershop_id))
            .map(|a| BarberSummary {
                id: a.id,
                name: a.name.as_str().to_string(),
            })
            .collect())
    }
}
