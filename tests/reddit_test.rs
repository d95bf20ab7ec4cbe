use shieldscrape::{
    extract, extract_with_options, parse_thread, ExtractionStatus, Options, ParserKind,
    RedditComment, RedditThread,
};
use url::Url;

const THREAD_URL: &str = "https://old.reddit.com/r/rust/comments/abc/a_thread/";

/// An old-layout comment with optional nested replies.
fn old_comment(author: &str, body: &str, replies: &[String]) -> String {
    let children = if replies.is_empty() {
        String::new()
    } else {
        format!(
            r#"<div class="child"><div class="sitetable listing">{}</div></div>"#,
            replies.concat()
        )
    };
    format!(
        r#"<div class="thing comment" data-author="{author}">
  <div class="entry">
    <p class="tagline"><a class="author" href="/user/{author}">{author}</a>
      <span class="score unvoted" title="2">2 points</span></p>
    <div class="usertext-body"><div class="md"><p>{body}</p></div></div>
  </div>
  {children}
</div>"#
    )
}

fn old_thread(comments: &[String]) -> String {
    format!(
        r#"<html><head><title>A thread : rust</title></head><body>
<div class="thing link" data-author="ferris" data-subreddit="rust" data-score="17">
  <p class="title"><a class="title" href="/r/rust/comments/abc/a_thread/">A thread</a></p>
  <div class="expando"><div class="usertext-body"><div class="md"><p>The post body.</p></div></div></div>
</div>
<div class="commentarea"><div class="sitetable nestedlisting">{}</div></div>
</body></html>"#,
        comments.concat()
    )
}

fn parse(html: &str, url: &str) -> RedditThread {
    match Url::parse(url) {
        Ok(url) => parse_thread(html, &url),
        Err(err) => panic!("bad test URL {url}: {err}"),
    }
}

fn authors(comments: &[RedditComment]) -> Vec<&str> {
    comments.iter().filter_map(|c| c.author.as_deref()).collect()
}

#[test]
fn root_comments_keep_source_order() {
    let html = old_thread(&[
        old_comment("first", "One", &[]),
        old_comment("second", "Two", &[]),
        old_comment("third", "Three", &[]),
    ]);
    let thread = parse(&html, THREAD_URL);

    assert_eq!(authors(&thread.comments), vec!["first", "second", "third"]);
    assert!(thread.comments.iter().all(|c| c.children.is_empty() && c.depth == 0));
}

#[test]
fn nested_replies_become_a_forest() {
    // Depth sequence 0, 1, 2, 1, 0.
    let html = old_thread(&[
        old_comment(
            "a",
            "root one",
            &[
                old_comment("b", "reply", &[old_comment("c", "reply to reply", &[])]),
                old_comment("d", "second reply", &[]),
            ],
        ),
        old_comment("e", "root two", &[]),
    ]);
    let thread = parse(&html, THREAD_URL);

    assert_eq!(authors(&thread.comments), vec!["a", "e"]);
    assert_eq!(thread.comment_count(), 5);

    let root = &thread.comments[0];
    assert_eq!(authors(&root.children), vec!["b", "d"]);
    assert_eq!(authors(&root.children[0].children), vec!["c"]);
    assert_eq!(root.children[0].children[0].depth, 2);
    assert_eq!(root.children[0].children[0].text, "reply to reply");
    assert!(root.children[1].children.is_empty());
}

#[test]
fn flat_comments_with_depth_attributes() {
    let html = r#"<html><head><title>Flat : r/rust</title></head><body>
<shreddit-post author="op" subreddit-prefixed-name="r/rust" score="3" post-title="Flat">
  <div slot="text-body"><p>Body.</p></div>
</shreddit-post>
<shreddit-comment-tree>
  <shreddit-comment author="orphan" depth="2"><div slot="comment"><p>Lost parent</p></div></shreddit-comment>
  <shreddit-comment author="root" depth="0"><div slot="comment"><p>Root</p></div></shreddit-comment>
  <shreddit-comment author="child" depth="1"><div slot="comment"><p>Child</p></div></shreddit-comment>
</shreddit-comment-tree>
</body></html>"#;
    let thread = parse(html, "https://www.reddit.com/r/rust/comments/1/flat/");

    assert_eq!(authors(&thread.comments), vec!["orphan", "root"]);
    assert_eq!(thread.comments[0].depth, 0);
    assert_eq!(authors(&thread.comments[1].children), vec!["child"]);
    assert_eq!(thread.comments[1].children[0].depth, 1);
}

#[test]
fn redesign_layout_is_parsed() {
    let html = r#"<html><head><title>Redesign thread : rust</title></head><body>
<div data-test-id="post-content">
  <h1 data-testid="post-title">Redesign thread</h1>
  <a data-testid="post_author_link" href="/user/someone/">u/someone</a>
  <a data-testid="subreddit-name" href="/r/rust/">r/rust</a>
  <div data-testid="post-score">15</div>
  <div data-click-id="text"><div class="md"><p>Redesign body.</p></div></div>
</div>
<div class="Comment">
  <a data-testid="comment_author_link" href="/user/replier/">replier</a>
  <div data-testid="comment"><p>Redesign reply.</p></div>
</div>
</body></html>"#;
    let thread = parse(html, "https://www.reddit.com/r/rust/comments/2/redesign_thread/");

    assert_eq!(thread.title.as_deref(), Some("Redesign thread"));
    assert_eq!(thread.author.as_deref(), Some("someone"));
    assert_eq!(thread.subreddit.as_deref(), Some("rust"));
    assert_eq!(thread.score, Some(15));
    assert_eq!(thread.text, "Redesign body.");
    assert_eq!(thread.comments.len(), 1);
    assert_eq!(thread.comments[0].author.as_deref(), Some("replier"));
    assert_eq!(thread.comments[0].text, "Redesign reply.");
}

#[test]
fn complete_thread_extracts_successfully() {
    let html = old_thread(&[old_comment("alice", "Nice post", &[])]);

    let result = extract(&html, THREAD_URL);
    match result {
        Ok(result) => {
            assert_eq!(result.parser, ParserKind::Reddit);
            assert_eq!(result.status, ExtractionStatus::Success, "{:?}", result.warnings);
            assert_eq!(result.document.title.as_deref(), Some("A thread"));
            assert_eq!(result.document.author.as_deref(), Some("ferris"));
            assert_eq!(result.document.url, THREAD_URL);
            assert!(result.document.text.starts_with("The post body."));
            assert!(result.document.text.contains("u/alice · 2 points\nNice post"));
            assert!(result.document.markdown.contains("## Comments"));
        }
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn comment_text_follows_source_order() {
    let html = old_thread(&[
        old_comment("first", "ONE", &[]),
        old_comment("second", "TWO", &[]),
        old_comment("third", "THREE", &[]),
    ]);

    let result = extract(&html, THREAD_URL);
    match result {
        Ok(result) => {
            let text = result.document.text;
            let positions: Vec<usize> = ["ONE", "TWO", "THREE"]
                .iter()
                .filter_map(|needle| text.find(needle))
                .collect();
            assert_eq!(positions.len(), 3, "{text}");
            assert!(positions.windows(2).all(|w| w[0] < w[1]), "{text}");
        }
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn thread_without_comments_can_skip_them() {
    let html = old_thread(&[old_comment("alice", "Hidden comment", &[])]);
    let options = Options {
        include_comments: false,
        ..Options::default()
    };

    let result = extract_with_options(&html, THREAD_URL, &options);
    match result {
        Ok(result) => {
            assert_eq!(result.document.text, "The post body.");
            assert!(!result.document.markdown.contains("Hidden comment"));
        }
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn missing_post_fields_make_extraction_partial() {
    let html = r#"<html><head><title>Bare thread</title></head><body>
        <div class="commentarea"></div></body></html>"#;

    let result = extract(html, "https://old.reddit.com/r/rust/comments/3/bare_thread/");
    match result {
        Ok(result) => {
            assert_eq!(result.parser, ParserKind::Reddit);
            assert_eq!(result.status, ExtractionStatus::Partial);
            assert_eq!(result.document.title.as_deref(), Some("Bare thread"));
            assert!(result.document.author.is_none());
            assert!(result.warnings.iter().any(|w| w.contains("author")));
        }
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn reddit_listing_without_comments_uses_generic_parser() {
    let html = r#"<html><head><title>rust</title></head><body>
        <div id="siteTable"><p>Hot posts this week.</p></div></body></html>"#;

    let result = extract(html, "https://old.reddit.com/r/rust/");
    match result {
        Ok(result) => {
            assert_eq!(result.parser, ParserKind::Generic);
            assert!(result.document.text.contains("Hot posts this week."));
        }
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn bare_testid_comments_reach_the_document_text() {
    let html = r#"<html><head><title>Testid thread : rust</title></head><body>
<h1>Testid thread</h1>
<div data-testid="comment"><a href="/user/first/">first</a><p>First comment body</p></div>
<div data-testid="comment"><a href="/user/second/">second</a><p>Second comment body</p></div>
</body></html>"#;

    let result = extract(html, "https://www.reddit.com/r/rust/comments/9/testid_thread/");
    match result {
        Ok(result) => {
            assert_eq!(result.parser, ParserKind::Reddit);
            assert!(result.document.text.contains("First comment body"), "{}", result.document.text);
            assert!(result.document.text.contains("Second comment body"));
            assert!(result.document.text.contains("u/first"));
        }
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn comment_scores_come_from_plain_score_spans() {
    let html = r#"<html><head><title>Scores : rust</title></head><body>
<div class="commentarea">
  <div class="comment"><a class="author" href="/user/a">a</a>
    <span class="score">12 points</span><time title="Mon Mar 4 12:00:00 2024 UTC">1 day ago</time>
    <div class="md"><p>Plain</p></div></div>
</div></body></html>"#;
    let thread = parse(html, THREAD_URL);

    assert_eq!(thread.comments.len(), 1);
    assert_eq!(thread.comments[0].score, Some(12));
    assert_eq!(thread.comments[0].timestamp.as_deref(), Some("2024-03-04T12:00:00Z"));
}
