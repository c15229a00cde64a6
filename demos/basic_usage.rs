#!/usr/bin/env rust

//! Basic usage example of slabbuf buffers and the slab pool

use slabbuf::{Buffer, BufferPool, Encoding, PoolConfig, Result};

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    println!("slabbuf Example");
    println!("===============");

    // Create a buffer pool with small slabs so rotation is visible
    let pool = BufferPool::new(PoolConfig::default().with_pool_size(256))?;
    println!("Pool size: {} bytes", pool.pool_size());

    // Allocate pooled buffers
    let header = pool.alloc(10);
    let body = pool.alloc(10);
    let large = pool.alloc(200);
    println!("\nAllocations:");
    println!("  header at offset {}", header.byte_offset());
    println!("  body at offset {}", body.byte_offset());
    println!("  large buffer shares slab: {}", large.shares_store(&header));

    // Numeric codec
    header.write_u16_be(0xcafe, 0)?;
    header.write_i32_le(-42, 2)?;
    header.write_f32_be(3.5, 6)?;
    println!("\nHeader bytes: {:?}", header);
    println!("  magic: {:#06x}", header.read_u16_be(0)?);
    println!("  value: {}", header.read_i32_le(2)?);
    println!("  ratio: {}", header.read_f32_be(6)?);

    // Text codec
    body.write("Héllo", 0, Encoding::Utf8)?;
    println!("\nBody as utf8:   {}", body.to_string_range(Encoding::Utf8, 0..6));
    println!("Body as hex:    {}", body.to_string_encoded(Encoding::Hex));
    println!("Body as base64: {}", body.to_string_encoded(Encoding::Base64));

    // Slices share memory with their parent
    let window = body.slice(1..3);
    window.fill(b'?', ..)?;
    println!("After filling a slice: {}", body.to_string_range(Encoding::Latin1, 0..6));

    // Search and compare
    let haystack = Buffer::from("the quick brown fox");
    println!("\n'quick' found at {:?}", haystack.index_of("quick", 0)?);
    println!("last 'o' found at {:?}", haystack.last_index_of(b'o', isize::MAX)?);
    println!("compare: {:?}", haystack.compare(&Buffer::from("the slow")));

    // Serialized record
    println!("\nJSON: {}", Buffer::from(vec![1, 2, 3]).to_json()?);

    let joined = pool.concat(&[header.slice(..2), Buffer::from("!")], None);
    println!("Concatenated: {:?}", joined);

    println!("\n{}", pool.stats().summary());
    Ok(())
}
