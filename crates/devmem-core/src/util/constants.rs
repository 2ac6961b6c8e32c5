/// Page shift value (12 bits) for 4KB pages
pub const PAGE_SHIFT: usize = 12;
/// Standard page size (4096 bytes)
pub const PAGE_SIZE: usize = 1 << PAGE_SHIFT;
/// Mask for extracting page offset
pub const PAGE_MASK: usize = PAGE_SIZE - 1;

/// Number of bytes shown per row of a memory dump
pub const ROW_BYTES: usize = 16;

/// Default physical memory device
pub const DEV_MEM: &str = "/dev/mem";
