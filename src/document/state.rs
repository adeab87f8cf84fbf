//! The `DocumentState` module collects incoming line items into a document.
use tokio::sync::mpsc;

use crate::document::{Document, DocumentError, DocumentItem};

/// Owns the document being assembled and the channel its items arrive on.
pub struct DocumentState {
    /// The document items are added to.
    document: Document,
    /// A channel receiver for incoming line items.
    receiver: mpsc::Receiver<DocumentItem>,
}

impl DocumentState {
    /// Creates a new state around an (usually empty) document.
    pub fn new(document: Document, receiver: mpsc::Receiver<DocumentItem>) -> Self {
        DocumentState { document, receiver }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    /// Checks the item can be priced, then appends it.
    fn add_item(&mut self, item: DocumentItem) -> Result<(), DocumentError> {
        let total = item.total()?;
        let id = self.document.push_item(item);
        tracing::debug!(item = id, %total, "added line item");
        Ok(())
    }

    /// Runs until every sender is dropped, adding items as they arrive.
    pub async fn run(&mut self) {
        while let Some(item) = self.receiver.recv().await {
            let name = item.name.clone();
            if let Err(e) = self.add_item(item) {
                tracing::warn!(item = %name, "skipping line item: {e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{ClientInfo, CommercialProposal};
    use crate::money::Amount;

    fn empty_proposal() -> Document {
        Document::Proposal(CommercialProposal {
            id: 1,
            number: "1".to_string(),
            date: "01.01.2025".to_string(),
            city: "Алматы".to_string(),
            client: ClientInfo::default(),
            items: Vec::new(),
            notes: None,
            valid_until: None,
        })
    }

    #[tokio::test]
    async fn test_collects_items() {
        let (sender, receiver) = mpsc::channel(100);
        let mut state = DocumentState::new(empty_proposal(), receiver);
        assert!(state.document().items().is_empty());
        for name in ["Рейка", "Подвес"] {
            sender
                .send(DocumentItem::new(0, name, "шт", 1.0, Amount::from_tenge(10)))
                .await
                .unwrap();
        }
        drop(sender); // Close the sender so `run` returns
        state.run().await;
        let document = state.into_document();
        let ids: Vec<_> = document.items().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_skips_invalid_items() {
        let (sender, receiver) = mpsc::channel(100);
        let mut state = DocumentState::new(empty_proposal(), receiver);
        sender
            .send(DocumentItem::new(0, "Брак", "шт", -2.0, Amount::from_tenge(10)))
            .await
            .unwrap();
        sender
            .send(DocumentItem::new(0, "Рейка", "шт", 2.0, Amount::from_tenge(10)))
            .await
            .unwrap();
        drop(sender);
        state.run().await;
        assert_eq!(state.document().items().len(), 1);
        assert_eq!(state.document().totals().unwrap().total, Amount::from_tenge(20));
    }
}
