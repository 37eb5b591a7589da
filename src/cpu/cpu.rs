use crate::cpu::{
    addr, from_opcode, CoreMemory, Interrupt, SharedItems, StatusFlag, BREAK_FLAG,
    INITIAL_PC_LOCATION, IRQ_HANDLER_LOCATION, NMI_HANDLER_LOCATION, UNUSED_FLAG,
};
use crate::error::EmulatorError;
use crate::ppu::OAM_SIZE;
use log::{debug, error, trace};

const OAM_DMA_ADDRESS: u16 = 0x4014;
const INTERRUPT_CYCLES: u16 = 7;

pub struct CPU {
    pub accumulator: u8,
    pub index_x: u8,
    pub index_y: u8,
    pub s_register: u8,
    pub program_counter: u16,
    /* flags only; bits 4 and 5 are never stored */
    pub status: u8,
    pub cycles: u64,
    /* set by indexed addressing when it crosses a page, cleared every tick */
    pub(crate) page_crossed: bool,
    interrupt: Option<Interrupt>,
    stall: u32,
    memory: CoreMemory,
}

impl Default for CPU {
    fn default() -> Self {
        CPU::new()
    }
}

impl CPU {
    /* a CPU with cleared RAM; call reset() once a cartridge is on the bus */
    pub fn new() -> CPU {
        CPU {
            accumulator: 0x00,
            index_x: 0x00,
            index_y: 0x00,
            s_register: 0xfd,
            program_counter: 0x00,
            status: 0x24 & !UNUSED_FLAG,
            cycles: 0,
            page_crossed: false,
            interrupt: None,
            stall: 0,
            memory: CoreMemory::new(),
        }
    }

    /* jumps through the reset vector with registers at their power-up values */
    pub fn reset(&mut self, bus: &mut SharedItems) {
        self.cycles = 0;
        self.accumulator = 0;
        self.index_x = 0;
        self.index_y = 0;
        self.interrupt = None;
        self.stall = 0;
        self.program_counter = self.read16(bus, INITIAL_PC_LOCATION);
        self.s_register = 0xfd;
        self.set_flags(0x24);
        debug!("CPU: reset, starting at 0x{:04x}", self.program_counter);
    }

    /**
     * Runs one step: a stalled cycle, an interrupt entry, or one instruction. Returns the
     * CPU cycles it took.
     */
    pub fn tick(&mut self, bus: &mut SharedItems) -> Result<u16, EmulatorError> {
        self.page_crossed = false;

        /* OAM DMA holds the bus */
        if self.stall > 0 {
            self.stall -= 1;
            self.cycles += 1;
            return Ok(1);
        }

        if let Some(interrupt) = self.interrupt.take() {
            match interrupt {
                Interrupt::NMI => {
                    self.enter_interrupt(bus, NMI_HANDLER_LOCATION);
                    return Ok(INTERRUPT_CYCLES);
                }
                Interrupt::IRQ if !StatusFlag::InterruptDisable.is_set(self) => {
                    self.enter_interrupt(bus, IRQ_HANDLER_LOCATION);
                    return Ok(INTERRUPT_CYCLES);
                }
                Interrupt::IRQ => trace!("CPU: IRQ discarded, interrupts disabled"),
            }
        }

        let start_cycles = self.cycles;
        let opcode_address = self.program_counter;
        let opcode = self.read(bus, opcode_address);
        let Some(realized) = from_opcode(opcode) else {
            error!("CPU: invalid opcode 0x{opcode:02x} at 0x{opcode_address:04x}");
            return Err(EmulatorError::InvalidOpcode {
                opcode,
                address: opcode_address,
            });
        };

        let byte1 = if realized.size >= 2 {
            self.read(bus, opcode_address.wrapping_add(1))
        } else {
            0
        };
        let byte2 = if realized.size >= 3 {
            self.read(bus, opcode_address.wrapping_add(2))
        } else {
            0
        };
        let address = realized.addr_mode.resolve_address(self, bus, byte1, byte2);

        self.program_counter = self.program_counter.wrapping_add(realized.size);
        self.cycles += realized.cycles as u64;

        let extra_cycles = realized
            .instruction
            .apply(self, bus, &realized.addr_mode, address)
            .inspect_err(|e| error!("CPU: {e} at 0x{opcode_address:04x}"))?;
        self.cycles += extra_cycles as u64;

        Ok((self.cycles - start_cycles) as u16)
    }

    fn enter_interrupt(&mut self, bus: &mut SharedItems, vector: u16) {
        self.push16(self.program_counter);
        self.push(self.get_flags() & !BREAK_FLAG);
        self.program_counter = self.read16(bus, vector);
        self.update_flag(StatusFlag::InterruptDisable, true);
        self.cycles += INTERRUPT_CYCLES as u64;
    }

    /* a later request replaces a pending one */
    pub fn trigger_nmi(&mut self) {
        self.interrupt = Some(Interrupt::NMI);
    }

    pub fn trigger_irq(&mut self) {
        self.interrupt = Some(Interrupt::IRQ);
    }

    pub fn pending_interrupt(&self) -> Option<Interrupt> {
        self.interrupt
    }

    pub fn stall_cycles(&self) -> u32 {
        self.stall
    }

    pub fn read(&mut self, bus: &mut SharedItems, address: u16) -> u8 {
        self.memory.read(bus, address)
    }

    pub fn write(&mut self, bus: &mut SharedItems, address: u16, value: u8) {
        if address == OAM_DMA_ADDRESS {
            self.oam_dma(bus, value);
        } else {
            self.memory.write(bus, address, value);
        }
    }

    /* copies a page into OAM through the normal read path, then sits out the transfer */
    fn oam_dma(&mut self, bus: &mut SharedItems, page: u8) {
        let base = (page as u16) << 8;
        let mut data = [0u8; OAM_SIZE];
        for (offset, byte) in data.iter_mut().enumerate() {
            *byte = self.read(bus, base.wrapping_add(offset as u16));
        }
        bus.ppu.write_oam_block(&data);
        self.stall += if self.cycles % 2 == 1 { 514 } else { 513 };
    }

    pub fn read16(&mut self, bus: &mut SharedItems, address: u16) -> u16 {
        let lo_byte = self.read(bus, address);
        let hi_byte = self.read(bus, address.wrapping_add(1));
        addr(lo_byte, hi_byte)
    }

    /* the high byte comes from the same page even when the low byte is at 0xff */
    pub fn read16_indirect(&mut self, bus: &mut SharedItems, address: u16) -> u16 {
        let hi_byte_addr = (address & 0xff00) | (address.wrapping_add(1) & 0x00ff);
        let lo_byte = self.read(bus, address);
        let hi_byte = self.read(bus, hi_byte_addr);
        addr(lo_byte, hi_byte)
    }

    pub fn ram(&self) -> &CoreMemory {
        &self.memory
    }

    pub fn ram_mut(&mut self) -> &mut CoreMemory {
        &mut self.memory
    }

    pub fn get_flags(&self) -> u8 {
        self.status | UNUSED_FLAG
    }

    pub fn set_flags(&mut self, value: u8) {
        self.status = value & !(BREAK_FLAG | UNUSED_FLAG);
    }

    pub fn update_flag(&mut self, flag: StatusFlag, new_val: bool) {
        flag.update_bool(self, new_val);
    }

    pub fn update_zero_neg_flags(&mut self, new_val: u8) {
        self.update_flag(StatusFlag::Zero, new_val == 0);
        self.update_flag(StatusFlag::Negative, new_val & 0x80 != 0);
    }

    pub fn push(&mut self, data: u8) {
        self.memory.write_ram(addr(self.s_register, 0x01), data);
        self.s_register = self.s_register.wrapping_sub(1);
    }

    pub fn push16(&mut self, value: u16) {
        self.push((value >> 8) as u8);
        self.push((value & 0xff) as u8);
    }

    pub fn pop(&mut self) -> u8 {
        self.s_register = self.s_register.wrapping_add(1);
        self.memory.read_ram(addr(self.s_register, 0x01))
    }

    pub fn pop16(&mut self) -> u16 {
        let lower = self.pop();
        let upper = self.pop();
        addr(lower, upper)
    }
}
