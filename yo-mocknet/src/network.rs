//! The mock network: participants, the proposal queue and the ledger view
//!
//! Nothing runs in the background. [`MockNetwork::submit`] only queues a
//! proposal; [`MockNetwork::run_network`] processes every queued proposal in
//! submission order, one at a time, before returning.

use crate::{MockNode, NetworkConfig, NetworkError, Result, TransactionStatus};
use std::collections::{BTreeMap, BTreeSet, HashSet, VecDeque};
use std::fmt;
use tracing::{debug, info, warn};
use yo_core::{
    Command, Contract, PartyId, SecureHash, StateRef, Transaction, TransactionBuilder,
    YoContract, YoState,
};

/// Outcome of a proposal: the committed transaction id or why it was rejected
pub type CommitResult = std::result::Result<SecureHash, NetworkError>;

/// Handle to a submitted proposal
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProposalId(u64);

impl fmt::Display for ProposalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

struct Proposal {
    proposer: PartyId,
    tx: Transaction,
    status: TransactionStatus,
    outcome: Option<CommitResult>,
}

/// Predicate matching states whose payload equals `payload`
pub fn payload_equals(payload: &str) -> impl Fn(&YoState) -> bool + '_ {
    move |state: &YoState| state.payload() == payload
}

pub struct MockNetwork {
    config: NetworkConfig,
    contract: Box<dyn Contract>,
    nodes: BTreeMap<PartyId, MockNode>,
    /// Outputs of committed transactions not yet consumed
    unconsumed: BTreeMap<StateRef, YoState>,
    consumed: BTreeSet<StateRef>,
    committed: BTreeSet<SecureHash>,
    queue: VecDeque<ProposalId>,
    proposals: BTreeMap<ProposalId, Proposal>,
    next_proposal: u64,
}

impl MockNetwork {
    /// Create a network with one node per configured name, verifying with
    /// the Yo contract
    pub fn new(config: NetworkConfig) -> Result<Self> {
        config.validate()?;

        let mut network = Self {
            config: config.clone(),
            contract: Box::new(YoContract),
            nodes: BTreeMap::new(),
            unconsumed: BTreeMap::new(),
            consumed: BTreeSet::new(),
            committed: BTreeSet::new(),
            queue: VecDeque::new(),
            proposals: BTreeMap::new(),
            next_proposal: 0,
        };

        for name in &config.node_names {
            network.create_node(name)?;
        }

        info!("Mock network started with {} nodes", network.nodes.len());
        Ok(network)
    }

    /// Replace the contract that proposals are verified against
    pub fn with_contract(mut self, contract: impl Contract + 'static) -> Self {
        self.contract = Box::new(contract);
        self
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    /// Add a participant
    pub fn create_node(&mut self, name: &str) -> Result<PartyId> {
        if self.party(name).is_some() {
            return Err(NetworkError::DuplicateParty(name.to_string()));
        }

        let identity = PartyId::new(name);
        self.nodes
            .insert(identity.clone(), MockNode::new(identity.clone()));
        debug!("Created node {}", identity);
        Ok(identity)
    }

    /// Identity of the node with the given legal name
    pub fn party(&self, name: &str) -> Option<PartyId> {
        self.nodes.keys().find(|p| p.name() == name).cloned()
    }

    pub fn parties(&self) -> Vec<PartyId> {
        self.nodes.keys().cloned().collect()
    }

    pub fn node(&self, party: &PartyId) -> Option<&MockNode> {
        self.nodes.get(party)
    }

    fn require_node(&self, party: &PartyId) -> Result<&MockNode> {
        self.nodes
            .get(party)
            .ok_or_else(|| NetworkError::UnknownParty(party.to_string()))
    }

    /// Queue a transaction for processing on the next drain
    pub fn submit(&mut self, proposer: &PartyId, tx: Transaction) -> Result<ProposalId> {
        self.require_node(proposer)?;

        let id = ProposalId(self.next_proposal);
        self.next_proposal += 1;

        debug!("Queued proposal {} for transaction {} from {}", id, tx.id(), proposer);
        self.proposals.insert(
            id,
            Proposal {
                proposer: proposer.clone(),
                tx,
                status: TransactionStatus::Proposed,
                outcome: None,
            },
        );
        self.queue.push_back(id);
        Ok(id)
    }

    /// Process every queued proposal. Returns how many were processed.
    pub fn run_network(&mut self) -> usize {
        let mut processed = 0;
        while let Some(id) = self.queue.pop_front() {
            self.process(id);
            processed += 1;
        }

        if processed > 0 {
            info!("Drained {} proposal(s)", processed);
        }
        processed
    }

    /// Submit, drain and return the outcome
    pub fn propose(&mut self, tx: Transaction, proposer: &PartyId) -> CommitResult {
        let id = self.submit(proposer, tx)?;
        self.run_network();
        self.outcome(id)
            .cloned()
            .unwrap_or(Err(NetworkError::UnknownProposal(id)))
    }

    /// Build the canonical Yo from `from` to `to` with the configured
    /// payload and queue it
    pub fn start_yo_flow(&mut self, from: &PartyId, to: &PartyId) -> Result<ProposalId> {
        let payload = self.config.default_payload.clone();
        self.start_yo_flow_with_payload(from, to, &payload)
    }

    pub fn start_yo_flow_with_payload(
        &mut self,
        from: &PartyId,
        to: &PartyId,
        payload: &str,
    ) -> Result<ProposalId> {
        self.require_node(to)?;

        let tx = TransactionBuilder::new()
            .output(YoState::with_payload(from.clone(), to.clone(), payload))
            .command(Command::send([from.clone()]))
            .sign(from.clone())
            .build()?;

        self.submit(from, tx)
    }

    /// Recorded outcome, once the proposal has been processed
    pub fn outcome(&self, id: ProposalId) -> Option<&CommitResult> {
        self.proposals.get(&id)?.outcome.as_ref()
    }

    pub fn status(&self, id: ProposalId) -> Option<TransactionStatus> {
        self.proposals.get(&id).map(|p| p.status)
    }

    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    /// Live states in `participant`'s vault matching `predicate`
    pub fn query<P>(&self, participant: &PartyId, predicate: P) -> Result<Vec<YoState>>
    where
        P: Fn(&YoState) -> bool,
    {
        Ok(self.require_node(participant)?.vault().query(predicate))
    }

    pub fn is_consumed(&self, reference: &StateRef) -> bool {
        self.consumed.contains(reference)
    }

    fn process(&mut self, id: ProposalId) {
        let (proposer, tx) = match self.proposals.get(&id) {
            Some(p) => (p.proposer.clone(), p.tx.clone()),
            None => {
                warn!("Dropping unknown proposal {}", id);
                return;
            }
        };

        let outcome = self.decide(id, &proposer, &tx);
        match &outcome {
            Ok(tx_id) => info!("Committed transaction {} proposed by {}", tx_id, proposer),
            Err(e) => warn!("Rejected proposal {} from {}: {}", id, proposer, e),
        }

        if let Some(proposal) = self.proposals.get_mut(&id) {
            proposal.outcome = Some(outcome);
        }
    }

    fn decide(&mut self, id: ProposalId, proposer: &PartyId, tx: &Transaction) -> CommitResult {
        if let Err(e) = self.check_ledger(tx).and_then(|()| self.verify(tx)) {
            self.advance(id, TransactionStatus::Rejected)?;
            return Err(e);
        }
        self.advance(id, TransactionStatus::Verified)?;

        if let Err(e) = self.check_recipients(tx) {
            self.advance(id, TransactionStatus::Rejected)?;
            return Err(e);
        }
        self.advance(id, TransactionStatus::Committed)?;
        self.commit(proposer, tx);

        Ok(tx.id())
    }

    fn advance(&mut self, id: ProposalId, next: TransactionStatus) -> Result<()> {
        let proposal = self
            .proposals
            .get_mut(&id)
            .ok_or(NetworkError::UnknownProposal(id))?;
        proposal.status = proposal.status.advance(next)?;
        Ok(())
    }

    /// Checks that do not depend on the contract. Double spends are found
    /// before anything else looks at the inputs.
    fn check_ledger(&self, tx: &Transaction) -> Result<()> {
        if self.committed.contains(&tx.id()) {
            return Err(NetworkError::DuplicateTransaction(tx.id()));
        }

        let mut seen = HashSet::new();
        for input in tx.inputs() {
            if self.consumed.contains(&input.reference) || !seen.insert(input.reference) {
                return Err(NetworkError::DoubleSpend {
                    state: input.reference,
                });
            }
        }

        for input in tx.inputs() {
            match self.unconsumed.get(&input.reference) {
                Some(state) if *state == input.state => {}
                _ => {
                    return Err(NetworkError::UnknownInput {
                        state: input.reference,
                    })
                }
            }
        }

        Ok(())
    }

    fn verify(&self, tx: &Transaction) -> Result<()> {
        self.contract.verify(tx)?;
        debug!("Transaction {} passed contract {}", tx.id(), self.contract.name());
        Ok(())
    }

    fn check_recipients(&self, tx: &Transaction) -> Result<()> {
        for output in tx.outputs() {
            self.require_node(output.recipient())?;
        }
        Ok(())
    }

    /// Apply a verified transaction. Every check has already passed, so this
    /// cannot fail part way.
    fn commit(&mut self, proposer: &PartyId, tx: &Transaction) {
        for input in tx.inputs() {
            self.unconsumed.remove(&input.reference);
            self.consumed.insert(input.reference);
            for node in self.nodes.values_mut() {
                node.vault_mut().remove(&input.reference);
            }
        }

        let mut record_on: BTreeSet<PartyId> = BTreeSet::new();
        record_on.insert(proposer.clone());

        for output in tx.out_refs() {
            let recipient = output.state.recipient().clone();
            self.unconsumed
                .insert(output.reference, output.state.clone());
            if let Some(node) = self.nodes.get_mut(&recipient) {
                node.vault_mut().insert(output);
            }
            record_on.insert(recipient);
        }

        for party in &record_on {
            if let Some(node) = self.nodes.get_mut(party) {
                node.record_transaction(tx);
            }
        }

        self.committed.insert(tx.id());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn network() -> (MockNetwork, PartyId, PartyId) {
        let network = MockNetwork::new(NetworkConfig::default()).unwrap();
        let a = network.party("Alice").unwrap();
        let b = network.party("Bob").unwrap();
        (network, a, b)
    }

    #[test]
    fn test_nodes_from_config() {
        let (network, a, b) = network();
        assert_eq!(network.parties().len(), 2);
        assert_eq!(network.node(&a).unwrap().identity(), &a);
        assert!(network.node(&b).unwrap().vault().is_empty());
    }

    #[test]
    fn test_duplicate_node_rejected() {
        let (mut network, _, _) = network();
        assert_eq!(
            network.create_node("Alice"),
            Err(NetworkError::DuplicateParty("Alice".to_string()))
        );
        assert!(network.create_node("Carol").is_ok());
        assert_eq!(network.parties().len(), 3);
    }

    #[test]
    fn test_submit_does_not_process_until_drained() {
        let (mut network, a, b) = network();
        let id = network.start_yo_flow(&a, &b).unwrap();

        assert_eq!(network.status(id), Some(TransactionStatus::Proposed));
        assert!(network.outcome(id).is_none());
        assert_eq!(network.pending_count(), 1);

        assert_eq!(network.run_network(), 1);
        assert_eq!(network.status(id), Some(TransactionStatus::Committed));
        assert_eq!(network.pending_count(), 0);
        assert_eq!(network.run_network(), 0);
    }

    #[test]
    fn test_unknown_proposer() {
        let (mut network, a, b) = network();
        let tx = TransactionBuilder::new()
            .output(YoState::new(a.clone(), b))
            .command(Command::send([a.clone()]))
            .sign(a)
            .build()
            .unwrap();

        let stranger = PartyId::new("Mallory");
        assert_eq!(
            network.submit(&stranger, tx),
            Err(NetworkError::UnknownParty("Mallory".to_string()))
        );
    }

    #[test]
    fn test_payload_equals_predicate() {
        let (_, a, b) = network();
        let matches = payload_equals("Yo!");
        assert!(matches(&YoState::new(a.clone(), b.clone())));
        assert!(!matches(&YoState::with_payload(a, b, "Hey")));
    }
}
