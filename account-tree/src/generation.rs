/// Hands out tickets for in-flight loads so a slow response to an older request
/// cannot overwrite the result of a newer one, and numbers every load that was
/// applied.
#[derive(Clone, Debug, Default)]
pub struct RequestGeneration {
    latest: u64,
    loads: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequestTicket(u64);

/// What the caller should do with a finished request.
#[derive(Debug, PartialEq, Eq)]
pub enum LoadOutcome<T, E> {
    /// A newer request was started after this one; drop the response.
    Stale,
    /// Apply `data`. `generation` differs from every earlier successful load,
    /// even when the payload is identical, so views keyed on it start over.
    Loaded { data: T, generation: u64 },
    Failed(E),
}

impl RequestGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self) -> RequestTicket {
        self.latest += 1;
        RequestTicket(self.latest)
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.latest
    }

    /// Number of successful loads applied so far.
    pub fn loads(&self) -> u64 {
        self.loads
    }

    pub fn settle<T, E>(
        &mut self,
        ticket: RequestTicket,
        result: Result<T, E>,
    ) -> LoadOutcome<T, E> {
        if !self.is_current(ticket) {
            return LoadOutcome::Stale;
        }
        match result {
            Ok(data) => {
                self.loads += 1;
                LoadOutcome::Loaded {
                    data,
                    generation: self.loads,
                }
            }
            Err(err) => LoadOutcome::Failed(err),
        }
    }
}
