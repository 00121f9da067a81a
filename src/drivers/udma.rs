//! Driver for memory-to-memory transfers on the uDMA controller.
//!
//! Uses channel 30, which responds to software requests, in auto-request
//! mode: one request moves the whole buffer. The controller reads its
//! channel programming from a control table in SRAM, so the table layout
//! here is part of the hardware contract.

use modular_bitfield::prelude::*;
use static_assertions::const_assert;
use tm4c123x_hal::sysctl::{control_power, reset, Domain, PowerControl, PowerState, RunMode};
use tm4c123x_hal::tm4c123x::UDMA;
use ufmt::derive::uDebug;

/// Channel used for software-requested memory-to-memory transfers
const CH_SW: usize = 30;

/// Transfer mode field values for the channel control word
const XFERMODE_STOP: u8 = 0;
const XFERMODE_AUTO: u8 = 2;

/// Item size / address increment encoding for 32-bit words
const WORD: u8 = 2;

/// Arbitrate after 8 items (2^3). Irrelevant for auto-request transfers,
/// which run to completion once started, but set to something sane anyway.
const ARBSIZE_8: u8 = 3;

/// Channel control word, as laid out in the third word of each control
/// table entry. The DMA hardware decrements XFERSIZE and clears XFERMODE
/// back to Stop as it works, which is how completion is observed.
#[bitfield(bits = 32)]
#[derive(Clone, Copy)]
struct ChannelControlWord {
    pub xfermode: B3,
    pub nxtuseburst: B1,
    pub xfersize: B10,
    pub arbsize: B4,
    pub srcprot0: B1,
    _reserved0: B2,
    pub dstprot0: B1,
    _reserved1: B2,
    pub srcsize: B2,
    pub srcinc: B2,
    pub dstsize: B2,
    pub dstinc: B2,
}

/// One channel control structure: source end pointer, destination end
/// pointer, control word, and an unused word the hardware skips over.
#[repr(C, align(16))]
#[derive(Clone, Copy)]
struct ChannelControl {
    src_end: u32,
    dst_end: u32,
    control: u32,
    _reserved: u32,
}

/// The channel control table. The hardware requires 1024-byte alignment
/// for the primary control structures of all 32 channels.
#[repr(C, align(1024))]
struct ControlTable {
    channels: [ChannelControl; 32],
}

const_assert!(core::mem::size_of::<[ChannelControl; 32]>() == 512);
const_assert!(core::mem::align_of::<ControlTable>() == 1024);

/// Control table lives in a static so its address stays fixed for the
/// lifetime of the program; the hardware holds a pointer to it.
static mut CONTROL_TABLE: ControlTable = ControlTable {
    channels: [ChannelControl {
        src_end: 0,
        dst_end: 0,
        control: 0,
        _reserved: 0,
    }; 32],
};

/// uDMA driver errors
#[derive(Debug, uDebug, PartialEq, Eq)]
pub enum DmaError {
    /// Source and destination must be the same length
    LengthMismatch,
    /// More items than a single channel transfer can move
    TransferTooLong,
    /// Zero-length transfer requested
    NothingToTransfer,
    /// The controller reported a bus error during the transfer
    BusError,
}

/// Memory-to-memory transfer engine on uDMA channel 30
pub struct MemoryDma {
    udma: UDMA,
}

impl MemoryDma {
    /// Power up the controller, point it at the control table, and
    /// configure channel 30 for software-requested transfers.
    pub fn new(udma: UDMA, pc: &PowerControl) -> MemoryDma {
        control_power(pc, Domain::MicroDma, RunMode::Run, PowerState::On);
        reset(pc, Domain::MicroDma);

        // Master enable
        udma.cfg.write(|w| unsafe { w.bits(1) });

        // The table's low 10 address bits are zero by its alignment, which
        // is exactly what the CTLBASE register requires
        let base = unsafe { &CONTROL_TABLE as *const ControlTable as u32 };
        udma.ctlbase.write(|w| unsafe { w.bits(base) });

        let ch: u32 = 1 << CH_SW;
        // Map channel 30 to its software-request assignment (encoding 0)
        udma.chmap3
            .modify(|r, w| unsafe { w.bits(r.bits() & !(0xF << 24)) });
        // Default priority, primary control structure, respond to both
        // single and burst requests, and unmask the channel
        udma.prioclr.write(|w| unsafe { w.bits(ch) });
        udma.altclr.write(|w| unsafe { w.bits(ch) });
        udma.useburstclr.write(|w| unsafe { w.bits(ch) });
        udma.reqmaskclr.write(|w| unsafe { w.bits(ch) });

        MemoryDma { udma }
    }

    /// Copy `src` into `dst` with a single auto-request transfer,
    /// busy-waiting until the controller reports completion.
    pub fn transfer(&mut self, src: &[u32], dst: &mut [u32]) -> Result<(), DmaError> {
        let n = src.len();
        if n != dst.len() {
            return Err(DmaError::LengthMismatch);
        }
        if n == 0 {
            return Err(DmaError::NothingToTransfer);
        }
        if n > 1024 {
            return Err(DmaError::TransferTooLong);
        }

        let control = ChannelControlWord::new()
            .with_xfermode(XFERMODE_AUTO)
            .with_xfersize((n - 1) as u16)
            .with_arbsize(ARBSIZE_8)
            .with_srcsize(WORD)
            .with_srcinc(WORD)
            .with_dstsize(WORD)
            .with_dstinc(WORD);

        let entry: *mut ChannelControl;
        unsafe {
            // End pointers are inclusive of the last item
            entry = &mut CONTROL_TABLE.channels[CH_SW] as *mut ChannelControl;
            entry.write_volatile(ChannelControl {
                src_end: src.as_ptr().add(n - 1) as u32,
                dst_end: dst.as_mut_ptr().add(n - 1) as u32,
                control: u32::from_le_bytes(control.into_bytes()),
                _reserved: 0,
            });
        }

        let ch: u32 = 1 << CH_SW;
        self.udma.enaset.write(|w| unsafe { w.bits(ch) });
        self.udma.swreq.write(|w| unsafe { w.bits(ch) });

        // The controller clears the mode field back to Stop when it is done
        loop {
            let ctl = unsafe { (entry as *const ChannelControl).read_volatile() };
            if ctl.control & 0x7 == XFERMODE_STOP as u32 {
                break;
            }
        }

        // Reading DMAERRCLR gives bus-error status; writing 1 clears it
        if self.udma.errclr.read().bits() != 0 {
            self.udma.errclr.write(|w| unsafe { w.bits(1) });
            return Err(DmaError::BusError);
        }
        Ok(())
    }
}
