//! Shared programmable mocks for integration tests.
//!
//! `FakeChain` is an in-memory stand-in for the deployed ledger contract;
//! `MockWallet` decodes submitted calldata and applies it to the shared
//! chain state so issue-then-verify round trips behave like the real thing.

#![allow(dead_code)]

use alloy::primitives::{Address, TxHash, B256, U256};
use alloy::sol_types::SolCall;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use certichain_client::config::{ChainRequirement, ClientConfig};
use certichain_client::error::{ClientError, ClientResult};
use certichain_client::ledger::bindings::CertiChain;
use certichain_client::ledger::{LedgerReads, VerificationResult};
use certichain_client::notify::{Notice, NoticeReceiver, NoticeSender};
use certichain_client::session::{MemoryStore, PersistStore, SessionManager};
use certichain_client::wallet::{CallRequest, TxStatus, WalletError, WalletProvider};

/// Hardhat's first well-known account.
pub fn test_account() -> Address {
    "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".parse().unwrap()
}

/// Hardhat's second well-known account.
pub fn second_account() -> Address {
    "0x70997970C51812dc3A010C7d01b50e0d17dc79C8".parse().unwrap()
}

pub const ISSUE_FEE_WEI: u64 = 1_000_000_000_000_000;
pub const REQUEST_FEE_WEI: u64 = 100_000_000_000_000;

/// In-memory ledger contract state shared by wallet and ledger mocks.
#[derive(Debug)]
pub struct FakeChain {
    pub admins: Mutex<HashSet<Address>>,
    /// certificate id → (student, institution, issued_at)
    pub certificates: Mutex<HashMap<String, (Address, String, u64)>>,
    pub issue_fee: Mutex<U256>,
    pub request_fee: Mutex<U256>,
}

impl Default for FakeChain {
    fn default() -> Self {
        Self {
            admins: Mutex::new(HashSet::new()),
            certificates: Mutex::new(HashMap::new()),
            issue_fee: Mutex::new(U256::from(ISSUE_FEE_WEI)),
            request_fee: Mutex::new(U256::from(REQUEST_FEE_WEI)),
        }
    }
}

pub struct MockLedgerInner {
    pub chain: Arc<FakeChain>,
    pub address: Address,
    pub is_admin_calls: AtomicU32,
    pub issue_fee_calls: AtomicU32,
    pub request_fee_calls: AtomicU32,
    pub verify_calls: AtomicU32,
    pub count_calls: AtomicU32,
    /// Fail every read.
    pub fail_reads: AtomicBool,
    /// Fail only the certificate count read.
    pub fail_count_reads: AtomicBool,
    /// Fail only the admin registry read.
    pub fail_admin_reads: AtomicBool,
}

/// Programmable `LedgerReads` implementation.
#[derive(Clone)]
pub struct MockLedger(pub Arc<MockLedgerInner>);

impl std::ops::Deref for MockLedger {
    type Target = MockLedgerInner;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl MockLedger {
    pub fn new(chain: Arc<FakeChain>) -> Self {
        Self(Arc::new(MockLedgerInner {
            chain,
            address: ClientConfig::default().ledger_address().unwrap(),
            is_admin_calls: AtomicU32::new(0),
            issue_fee_calls: AtomicU32::new(0),
            request_fee_calls: AtomicU32::new(0),
            verify_calls: AtomicU32::new(0),
            count_calls: AtomicU32::new(0),
            fail_reads: AtomicBool::new(false),
            fail_count_reads: AtomicBool::new(false),
            fail_admin_reads: AtomicBool::new(false),
        }))
    }

    fn read_failure(&self) -> ClientResult<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            Err(ClientError::ReadFailed("simulated network error".to_string()))
        } else {
            Ok(())
        }
    }
}

impl LedgerReads for MockLedger {
    async fn is_admin(&self, account: Address) -> ClientResult<bool> {
        self.is_admin_calls.fetch_add(1, Ordering::SeqCst);
        self.read_failure()?;
        if self.fail_admin_reads.load(Ordering::SeqCst) {
            return Err(ClientError::ReadFailed("simulated network error".to_string()));
        }
        Ok(self.chain.admins.lock().unwrap().contains(&account))
    }

    async fn verify_certificate(&self, certificate_id: &str) -> ClientResult<VerificationResult> {
        self.verify_calls.fetch_add(1, Ordering::SeqCst);
        self.read_failure()?;
        Ok(match self.chain.certificates.lock().unwrap().get(certificate_id) {
            Some((student, institution, issued_at)) => VerificationResult {
                exists: true,
                student: *student,
                institution: institution.clone(),
                issued_at: *issued_at,
            },
            None => VerificationResult::not_found(),
        })
    }

    async fn certificate_count(&self) -> ClientResult<u64> {
        self.count_calls.fetch_add(1, Ordering::SeqCst);
        self.read_failure()?;
        if self.fail_count_reads.load(Ordering::SeqCst) {
            return Err(ClientError::ReadFailed("simulated network error".to_string()));
        }
        Ok(self.chain.certificates.lock().unwrap().len() as u64)
    }

    async fn issue_fee(&self) -> ClientResult<U256> {
        self.issue_fee_calls.fetch_add(1, Ordering::SeqCst);
        self.read_failure()?;
        Ok(*self.chain.issue_fee.lock().unwrap())
    }

    async fn request_fee(&self) -> ClientResult<U256> {
        self.request_fee_calls.fetch_add(1, Ordering::SeqCst);
        self.read_failure()?;
        Ok(*self.chain.request_fee.lock().unwrap())
    }

    fn address(&self) -> Address {
        self.address
    }
}

pub struct MockWalletInner {
    pub chain: Arc<FakeChain>,
    pub accounts: Mutex<Vec<Address>>,
    pub active_chain: AtomicU64,
    pub known_chains: Mutex<Vec<u64>>,
    pub get_accounts_calls: AtomicU32,
    pub request_accounts_calls: AtomicU32,
    pub switch_calls: AtomicU32,
    pub add_chain_calls: AtomicU32,
    pub sign_and_send_calls: AtomicU32,
    pub fail_request_accounts: AtomicBool,
    pub fail_switch_reason: Mutex<Option<String>>,
    pub fail_send_reason: Mutex<Option<String>>,
    pub last_call_value: Mutex<Option<U256>>,
    next_tx: AtomicU64,
    outcomes: Mutex<HashMap<TxHash, TxStatus>>,
}

/// Programmable `WalletProvider` implementation.
#[derive(Clone)]
pub struct MockWallet(pub Arc<MockWalletInner>);

impl std::ops::Deref for MockWallet {
    type Target = MockWalletInner;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl MockWallet {
    pub fn new(chain: Arc<FakeChain>, accounts: Vec<Address>, active_chain: u64) -> Self {
        Self(Arc::new(MockWalletInner {
            chain,
            accounts: Mutex::new(accounts),
            active_chain: AtomicU64::new(active_chain),
            known_chains: Mutex::new(vec![active_chain]),
            get_accounts_calls: AtomicU32::new(0),
            request_accounts_calls: AtomicU32::new(0),
            switch_calls: AtomicU32::new(0),
            add_chain_calls: AtomicU32::new(0),
            sign_and_send_calls: AtomicU32::new(0),
            fail_request_accounts: AtomicBool::new(false),
            fail_switch_reason: Mutex::new(None),
            fail_send_reason: Mutex::new(None),
            last_call_value: Mutex::new(None),
            next_tx: AtomicU64::new(0),
            outcomes: Mutex::new(HashMap::new()),
        }))
    }

    pub fn set_accounts(&self, accounts: Vec<Address>) {
        *self.accounts.lock().unwrap() = accounts;
    }

    /// Execute a decoded call against the fake chain, mirroring the
    /// contract's own checks.
    fn apply(&self, sender: Address, call: &CallRequest) -> TxStatus {
        if let Ok(decoded) = CertiChain::issueCertificateCall::abi_decode(&call.input) {
            if call.value != *self.chain.issue_fee.lock().unwrap() {
                return TxStatus::Reverted("execution reverted: Incorrect fee".to_string());
            }
            if !self.chain.admins.lock().unwrap().contains(&sender) {
                return TxStatus::Reverted(
                    "execution reverted: Only admin can issue certificates".to_string(),
                );
            }
            self.chain.certificates.lock().unwrap().insert(
                decoded.certificateHash.clone(),
                (decoded.student, decoded.institution.clone(), 1_700_000_000),
            );
            return TxStatus::Confirmed { block_number: 1 };
        }

        if CertiChain::requestCertificateCall::abi_decode(&call.input).is_ok() {
            if call.value != *self.chain.request_fee.lock().unwrap() {
                return TxStatus::Reverted("execution reverted: Incorrect fee".to_string());
            }
            return TxStatus::Confirmed { block_number: 1 };
        }

        TxStatus::Reverted("execution reverted: unknown selector".to_string())
    }
}

impl WalletProvider for MockWallet {
    async fn get_accounts(&self) -> Result<Vec<Address>, WalletError> {
        self.get_accounts_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.accounts.lock().unwrap().clone())
    }

    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
        self.request_accounts_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_request_accounts.load(Ordering::SeqCst) {
            return Err(WalletError::Rejected("user rejected the request".to_string()));
        }
        Ok(self.accounts.lock().unwrap().clone())
    }

    async fn chain_id(&self) -> Result<u64, WalletError> {
        Ok(self.active_chain.load(Ordering::SeqCst))
    }

    async fn switch_chain(&self, chain_id: u64) -> Result<(), WalletError> {
        self.switch_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(reason) = self.fail_switch_reason.lock().unwrap().clone() {
            return Err(WalletError::Rejected(reason));
        }
        if self.known_chains.lock().unwrap().contains(&chain_id) {
            self.active_chain.store(chain_id, Ordering::SeqCst);
            Ok(())
        } else {
            Err(WalletError::UnrecognizedChain(chain_id))
        }
    }

    async fn add_chain(&self, chain: &ChainRequirement) -> Result<(), WalletError> {
        self.add_chain_calls.fetch_add(1, Ordering::SeqCst);
        self.known_chains.lock().unwrap().push(chain.chain_id);
        Ok(())
    }

    async fn sign_and_send(&self, call: CallRequest) -> Result<TxHash, WalletError> {
        self.sign_and_send_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(reason) = self.fail_send_reason.lock().unwrap().clone() {
            return Err(WalletError::Rpc(reason));
        }

        let sender = self
            .accounts
            .lock()
            .unwrap()
            .first()
            .copied()
            .ok_or_else(|| WalletError::Rejected("no account to sign with".to_string()))?;

        *self.last_call_value.lock().unwrap() = Some(call.value);
        let status = self.apply(sender, &call);

        let n = self.next_tx.fetch_add(1, Ordering::SeqCst) + 1;
        let tx_hash = B256::from(U256::from(n));
        self.outcomes.lock().unwrap().insert(tx_hash, status);
        Ok(tx_hash)
    }

    async fn confirm(&self, tx_hash: TxHash) -> Result<TxStatus, WalletError> {
        self.outcomes
            .lock()
            .unwrap()
            .get(&tx_hash)
            .cloned()
            .ok_or_else(|| WalletError::Rpc("unknown transaction".to_string()))
    }
}

/// A wallet, a ledger binding and the chain state they share.
pub struct TestEnv {
    pub chain_state: Arc<FakeChain>,
    pub wallet: MockWallet,
    pub ledger: MockLedger,
}

/// Environment whose wallet already sits on the required chain.
pub fn env_with_account(account: Address) -> TestEnv {
    let chain_state = Arc::new(FakeChain::default());
    let wallet = MockWallet::new(chain_state.clone(), vec![account], 31337);
    let ledger = MockLedger::new(chain_state.clone());
    TestEnv { chain_state, wallet, ledger }
}

pub type TestSessionManager = SessionManager<MockWallet, MockLedger, MemoryStore>;

pub fn manager(env: &TestEnv, notices: NoticeSender) -> TestSessionManager {
    SessionManager::new(
        Some(env.wallet.clone()),
        env.ledger.clone(),
        MemoryStore::default(),
        ChainRequirement::default(),
        notices,
    )
}

/// Manager whose persisted store already records a reconnect intent.
pub fn manager_with_intent(env: &TestEnv, notices: NoticeSender) -> TestSessionManager {
    let store = MemoryStore::default();
    store.store_intent(true);
    SessionManager::new(
        Some(env.wallet.clone()),
        env.ledger.clone(),
        store,
        ChainRequirement::default(),
        notices,
    )
}

pub fn manager_without_wallet(env: &TestEnv, notices: NoticeSender) -> TestSessionManager {
    SessionManager::new(
        None,
        env.ledger.clone(),
        MemoryStore::default(),
        ChainRequirement::default(),
        notices,
    )
}

/// Collect every notice currently queued.
pub fn drain_notices(rx: &mut NoticeReceiver) -> Vec<Notice> {
    let mut notices = Vec::new();
    while let Ok(notice) = rx.try_recv() {
        notices.push(notice);
    }
    notices
}
