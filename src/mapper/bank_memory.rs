pub const PAGE_SIZE: usize = 0x400; /* 1kb */

/**
 * Paged storage behind a cartridge window. Every logical address goes through the page
 * table; switching banks only rewrites page table entries, never the data itself.
 */
#[derive(Debug, Clone)]
pub struct BankMemory {
    data: Vec<u8>,
    window_size: usize,
    pub fixed: bool, /* mapper-specific: MMC1 uses it for 32kb PRG / 8kb CHR mode */
    pages: Vec<usize>,
}

impl BankMemory {
    pub fn new(data: Vec<u8>, window_size: usize, fixed: bool) -> Self {
        /* window must be a whole number of pages, backed by at least one page */
        assert_eq!(window_size % PAGE_SIZE, 0);
        assert!(!data.is_empty());

        BankMemory {
            data,
            window_size,
            fixed,
            pages: (0..window_size / PAGE_SIZE).collect(),
        }
    }

    /**
     * Maps the logical range [from_address, to_address) onto the bank_index-th block of
     * (to_address - from_address) bytes in the backing data.
     */
    pub fn switch_bank(&mut self, from_address: usize, to_address: usize, bank_index: usize) {
        let first_page = from_address / PAGE_SIZE;
        let last_page = to_address / PAGE_SIZE;
        let base = bank_index * (last_page - first_page);

        for (offset, page) in self.pages[first_page..last_page].iter_mut().enumerate() {
            *page = base + offset;
        }
    }

    pub fn read(&self, address: u16) -> u8 {
        self.data[self.map_address(address)]
    }

    pub fn write(&mut self, address: u16, value: u8) {
        let index = self.map_address(address);
        self.data[index] = value;
    }

    /* how many banks of bank_size the backing data holds; never zero */
    pub fn bank_count(&self, bank_size: usize) -> usize {
        (self.data.len() / bank_size).max(1)
    }

    pub fn pages(&self) -> &[usize] {
        &self.pages
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    fn map_address(&self, address: u16) -> usize {
        let address = address as usize % self.window_size;
        /* images smaller than the selected bank mirror, like unconnected address lines */
        (self.pages[address / PAGE_SIZE] * PAGE_SIZE + address % PAGE_SIZE) % self.data.len()
    }
}
