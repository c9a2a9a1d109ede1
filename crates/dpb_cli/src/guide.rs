//! Built-in markdown and math usage guide shown by `dpb guide`.

pub(crate) const MARKDOWN_GUIDE: &str = r#"#### **Headings**

```markdown
# Heading 1
## Heading 2
### Heading 3
```

#### **Bold & Italics**

```markdown
**Bold**
*Italic*
~~Strikethrough~~
```

**Preview:** **Bold**, *Italic*, ~~Strikethrough~~

#### **Lists**

```markdown
- Item 1
- Item 2

1. First
2. Second

- [x] Done
- [ ] Todo
```

#### **Links & Images**

```markdown
[Link](https://example.com)
![Alt text](image_url)
```

#### **Code Blocks**

- Inline: `` `code` ``
- Block:

~~~markdown
```js
console.log("Hello, world!");
```
~~~

#### **Blockquotes & Tables**

```markdown
> This is a quote.

| Name  | Age |
|-------|-----|
| Alice | 24  |
| Bob   | 30  |
```

#### **KaTeX (Math Support)**

- Inline: wrap the formula in `$$` inside a code span.

```markdown
`$$c = \pm\sqrt{a^2 + b^2}$$`
```

**Preview:** `$$c = \pm\sqrt{a^2 + b^2}$$`

- Block: use a fenced block tagged `KaTeX`.

~~~markdown
```KaTeX
c = \pm\sqrt{a^2 + b^2}
```
~~~

**Preview:**

```KaTeX
c = \pm\sqrt{a^2 + b^2}
```
"#;
