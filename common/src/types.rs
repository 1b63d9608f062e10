//! レシート明細の型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - LineItem: 明細1行（数量・品名・品番・価格、すべて文字列）
//! - ItemField: 明細の編集対象フィールド
//! - ExtractionResponse: 抽出バックエンドの成功レスポンス
//! - ErrorBody: 抽出バックエンドの失敗レスポンス

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// レシート明細1行
///
/// 値はすべて自由入力のテキスト。数値として解釈・検証はしない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    #[serde(default, deserialize_with = "text_or_number")]
    pub quantity: String,

    #[serde(default, deserialize_with = "text_or_number")]
    pub name: String,

    #[serde(default, deserialize_with = "text_or_number")]
    pub item_number: String,

    #[serde(default, deserialize_with = "text_or_number")]
    pub price: String,
}

impl LineItem {
    pub fn new(
        quantity: impl Into<String>,
        name: impl Into<String>,
        item_number: impl Into<String>,
        price: impl Into<String>,
    ) -> Self {
        Self {
            quantity: quantity.into(),
            name: name.into(),
            item_number: item_number.into(),
            price: price.into(),
        }
    }

    /// フィールド値を取得
    pub fn field(&self, field: ItemField) -> &str {
        match field {
            ItemField::Quantity => &self.quantity,
            ItemField::Name => &self.name,
            ItemField::ItemNumber => &self.item_number,
            ItemField::Price => &self.price,
        }
    }

    /// フィールド値を上書き
    pub fn set_field(&mut self, field: ItemField, value: impl Into<String>) {
        let slot = match field {
            ItemField::Quantity => &mut self.quantity,
            ItemField::Name => &mut self.name,
            ItemField::ItemNumber => &mut self.item_number,
            ItemField::Price => &mut self.price,
        };
        *slot = value.into();
    }
}

/// 「+ 明細追加」で作られる行
impl Default for LineItem {
    fn default() -> Self {
        Self::new("1", "", "", "0.00")
    }
}

/// 明細の編集対象フィールド（表示順）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemField {
    Quantity,
    Name,
    ItemNumber,
    Price,
}

impl ItemField {
    pub const ALL: [ItemField; 4] = [
        ItemField::Quantity,
        ItemField::Name,
        ItemField::ItemNumber,
        ItemField::Price,
    ];

    /// 画面表示用ラベル
    pub fn label(&self) -> &'static str {
        match self {
            ItemField::Quantity => "Qty",
            ItemField::Name => "Name",
            ItemField::ItemNumber => "Item #",
            ItemField::Price => "Price",
        }
    }

    /// JSON上のキー名
    pub fn key(&self) -> &'static str {
        match self {
            ItemField::Quantity => "quantity",
            ItemField::Name => "name",
            ItemField::ItemNumber => "itemNumber",
            ItemField::Price => "price",
        }
    }
}

impl FromStr for ItemField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "quantity" | "qty" | "q" => Ok(ItemField::Quantity),
            "name" | "n" => Ok(ItemField::Name),
            "itemnumber" | "item_number" | "item-number" | "number" | "#" => {
                Ok(ItemField::ItemNumber)
            }
            "price" | "p" => Ok(ItemField::Price),
            _ => Err(format!(
                "Unknown field: {}. Use quantity, name, item-number, or price",
                s
            )),
        }
    }
}

impl fmt::Display for ItemField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// 抽出バックエンドの成功レスポンス
///
/// `imageUrl` はオリジンからの相対パス（例: `/uploads/r.jpg`）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResponse {
    #[serde(default, deserialize_with = "text_or_number")]
    pub vendor: String,

    #[serde(default)]
    pub items: Vec<LineItem>,

    #[serde(default)]
    pub image_url: String,
}

/// 抽出バックエンドの失敗レスポンス（`{ "error": "..." }`）
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// 文字列・数値・nullを文字列として受け取る
///
/// バックエンドは数量や価格を数値で返すことがあるため
fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_item_default() {
        let item = LineItem::default();
        assert_eq!(item.quantity, "1");
        assert_eq!(item.name, "");
        assert_eq!(item.item_number, "");
        assert_eq!(item.price, "0.00");
    }

    #[test]
    fn test_line_item_set_field() {
        let mut item = LineItem::new("2", "Bread", "200", "2.00");
        item.set_field(ItemField::Price, "2.50");
        assert_eq!(item, LineItem::new("2", "Bread", "200", "2.50"));
        assert_eq!(item.field(ItemField::Name), "Bread");
    }

    #[test]
    fn test_item_field_from_str() {
        assert_eq!("qty".parse::<ItemField>().unwrap(), ItemField::Quantity);
        assert_eq!("Name".parse::<ItemField>().unwrap(), ItemField::Name);
        assert_eq!("item-number".parse::<ItemField>().unwrap(), ItemField::ItemNumber);
        assert_eq!("price".parse::<ItemField>().unwrap(), ItemField::Price);
        assert!("total".parse::<ItemField>().is_err());
    }

    #[test]
    fn test_extraction_response_deserialize() {
        let json = r#"{
            "vendor": "Store A",
            "items": [
                {"quantity": "1", "name": "Milk", "itemNumber": "100", "price": "3.50"}
            ],
            "imageUrl": "/uploads/receipt.jpg"
        }"#;

        let response: ExtractionResponse = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(response.vendor, "Store A");
        assert_eq!(response.items, vec![LineItem::new("1", "Milk", "100", "3.50")]);
        assert_eq!(response.image_url, "/uploads/receipt.jpg");
    }

    #[test]
    fn test_extraction_response_numbers_and_missing_fields() {
        // 数値・欠落フィールドは文字列に正規化
        let json = r#"{
            "vendor": "Store B",
            "items": [{"quantity": 2, "name": "Eggs", "price": 4.25}],
            "imageUrl": "/uploads/b.png"
        }"#;

        let response: ExtractionResponse = serde_json::from_str(json).expect("デシリアライズ失敗");
        let item = &response.items[0];
        assert_eq!(item.quantity, "2");
        assert_eq!(item.item_number, "");
        assert_eq!(item.price, "4.25");
    }

    #[test]
    fn test_line_item_serialize_camel_case() {
        let json = serde_json::to_string(&LineItem::new("1", "Milk", "100", "3.50")).unwrap();
        assert!(json.contains("\"itemNumber\":\"100\""));
    }
}
