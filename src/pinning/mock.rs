use super::PinningService;
use crate::models::{Board, Pin};
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct MockPinningClient {
    boards: Arc<Mutex<Vec<Board>>>,
    pins: Arc<Mutex<Vec<(String, String, String)>>>,
    list_count: Arc<Mutex<usize>>,
    create_board_count: Arc<Mutex<usize>>,
    fail_boards: bool,
    fail_pins: bool,
}

impl MockPinningClient {
    pub fn new() -> Self {
        Self {
            boards: Arc::new(Mutex::new(Vec::new())),
            pins: Arc::new(Mutex::new(Vec::new())),
            list_count: Arc::new(Mutex::new(0)),
            create_board_count: Arc::new(Mutex::new(0)),
            fail_boards: false,
            fail_pins: false,
        }
    }

    pub fn with_board(self, id: &str, name: &str) -> Self {
        self.boards.lock().unwrap().push(Board {
            id: id.to_string(),
            name: name.to_string(),
            privacy: None,
        });
        self
    }

    /// Make board listing and creation fail with a 401.
    pub fn with_board_failure(mut self) -> Self {
        self.fail_boards = true;
        self
    }

    pub fn with_pin_failure(mut self) -> Self {
        self.fail_pins = true;
        self
    }

    pub fn get_list_count(&self) -> usize {
        *self.list_count.lock().unwrap()
    }

    pub fn get_create_board_count(&self) -> usize {
        *self.create_board_count.lock().unwrap()
    }

    /// Pins created so far as `(board_id, image_url, note)`.
    pub fn get_pins(&self) -> Vec<(String, String, String)> {
        self.pins.lock().unwrap().clone()
    }

    pub fn total_calls(&self) -> usize {
        self.get_list_count() + self.get_create_board_count() + self.get_pins().len()
    }

    fn unauthorized() -> Error {
        Error::RemoteService {
            service: "mock",
            status: 401,
            body: "unauthorized".to_string(),
        }
    }
}

impl Default for MockPinningClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PinningService for MockPinningClient {
    async fn list_boards(&self) -> Result<Vec<Board>> {
        *self.list_count.lock().unwrap() += 1;
        if self.fail_boards {
            return Err(Self::unauthorized());
        }
        Ok(self.boards.lock().unwrap().clone())
    }

    async fn create_board(&self, name: &str, _description: &str, privacy: &str) -> Result<Board> {
        let count = {
            let mut count = self.create_board_count.lock().unwrap();
            *count += 1;
            *count
        };
        if self.fail_boards {
            return Err(Self::unauthorized());
        }

        let board = Board {
            id: format!("board-{}", count),
            name: name.to_string(),
            privacy: Some(privacy.to_string()),
        };
        self.boards.lock().unwrap().push(board.clone());
        Ok(board)
    }

    async fn create_pin(&self, board_id: &str, image_url: &str, note: &str) -> Result<Pin> {
        if self.fail_pins {
            return Err(Error::RemoteService {
                service: "mock",
                status: 500,
                body: "pin rejected".to_string(),
            });
        }

        let mut pins = self.pins.lock().unwrap();
        pins.push((board_id.to_string(), image_url.to_string(), note.to_string()));
        Ok(Pin {
            id: Some(format!("pin-{}", pins.len())),
        })
    }
}
