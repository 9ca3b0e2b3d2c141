pub fn markdown_fixture() -> &'static str {
    return r#"
# Printing numbers

Here's how to print in **Rust**, the *systems* way, using `println!`.

```rust
fn print_numbers() {
    for i in 0..=10 {
        println!("{i}");
    }
}
```

And a block without a language, kept literal incase an LLM doesn't attach one.

```
abc123
```

That's it!
"#
    .trim();
}
