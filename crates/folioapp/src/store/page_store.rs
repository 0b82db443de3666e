use super::backend::StorageBackend;
use super::PagePersistence;
use crate::error::Result;
use crate::notebook::Notebook;

/// The loaded notebook paired with the persistence it was loaded from.
///
/// [`PageStore::commit`] is the only way to mutate the notebook: the change is
/// applied to a draft, the draft is saved, and only a successful save replaces
/// the in-memory state. A failed write leaves both sides as they were.
pub struct PageStore<B: StorageBackend> {
    notebook: Notebook,
    persistence: PagePersistence<B>,
}

impl<B: StorageBackend> PageStore<B> {
    /// Loads (or seeds) the collection from `backend`.
    pub fn open(backend: B) -> Result<Self> {
        let persistence = PagePersistence::new(backend);
        let pages = persistence.load()?;
        Ok(Self {
            notebook: Notebook::from_pages(pages),
            persistence,
        })
    }

    pub fn notebook(&self) -> &Notebook {
        &self.notebook
    }

    pub fn backend(&self) -> &B {
        self.persistence.backend()
    }

    pub fn commit<R>(&mut self, change: impl FnOnce(&mut Notebook) -> R) -> Result<R> {
        let mut draft = self.notebook.clone();
        let outcome = change(&mut draft);
        self.persistence.save(draft.pages())?;
        self.notebook = draft;
        Ok(outcome)
    }

    /// Like [`commit`](Self::commit), but a change returning `None` is
    /// discarded without a write.
    pub fn commit_changed<R>(
        &mut self,
        change: impl FnOnce(&mut Notebook) -> Option<R>,
    ) -> Result<Option<R>> {
        let mut draft = self.notebook.clone();
        let Some(outcome) = change(&mut draft) else {
            return Ok(None);
        };
        self.persistence.save(draft.pages())?;
        self.notebook = draft;
        Ok(Some(outcome))
    }

    /// Like [`commit`](Self::commit), but a failing change is discarded
    /// without a write and its error returned.
    pub fn try_commit<R>(&mut self, change: impl FnOnce(&mut Notebook) -> Result<R>) -> Result<R> {
        let mut draft = self.notebook.clone();
        let outcome = change(&mut draft)?;
        self.persistence.save(draft.pages())?;
        self.notebook = draft;
        Ok(outcome)
    }

    /// Re-reads the stored collection, discarding in-memory state.
    pub fn reload(&mut self) -> Result<()> {
        self.notebook = Notebook::from_pages(self.persistence.load()?);
        Ok(())
    }
}
