// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Runtime values.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use cascade_ast::expr::{Expr, Modifier, StandardType};
use cascade_ast::stmt::Stmt;
use indexmap::IndexMap;

use crate::env::Domain;
use crate::interp::{Interpreter, RuntimeError};

/// A first-class runtime value.
///
/// Literals are held inline. Functions, classes and objects are shared
/// by reference, so copies of a member observe the same container.
#[derive(Clone)]
pub enum Value {
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    Bool(bool),
    Null,
    Function(Rc<FunctionValue>),
    HostFunction(Rc<HostFunction>),
    Class(Rc<ClassValue>),
    Object(Rc<ObjectValue>),
}

impl Value {
    /// The type tag this value carries.
    pub fn standard_type(&self) -> StandardType {
        match self {
            Value::Int(_) => StandardType::Integer,
            Value::Long(_) => StandardType::Long,
            Value::Float(_) => StandardType::Float,
            Value::Double(_) => StandardType::Double,
            Value::String(_) => StandardType::String,
            Value::Bool(_) => StandardType::Boolean,
            Value::Null => StandardType::Void,
            Value::Function(_) => StandardType::Function,
            Value::HostFunction(_) => StandardType::HostFunction,
            Value::Class(_) => StandardType::Class,
            Value::Object(_) => StandardType::Object,
        }
    }

    /// Full runtime type, including an object's class meta.
    pub fn runtime_type(&self) -> RuntimeType {
        match self {
            Value::Object(obj) => RuntimeType {
                standard: StandardType::Object,
                meta: obj.meta.clone(),
                nullable: false,
            },
            other => RuntimeType::plain(other.standard_type()),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.standard_type().name()
    }

    pub fn is_numeric(&self) -> bool {
        self.standard_type().is_numeric()
    }

    /// Literal kinds compare by value; the rest by identity.
    pub fn is_literal(&self) -> bool {
        !matches!(
            self,
            Value::Function(_) | Value::HostFunction(_) | Value::Class(_) | Value::Object(_)
        )
    }

    pub fn same_kind(&self, other: &Value) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    /// String form of a value usable as a member key.
    pub fn as_member_key(&self) -> Option<String> {
        match self {
            Value::String(s) => Some(s.clone()),
            Value::Bool(_) | Value::Int(_) | Value::Long(_) | Value::Float(_) | Value::Double(_) => {
                Some(self.to_string())
            }
            _ => None,
        }
    }

    /// Member map of a class or object.
    pub fn members(&self) -> Option<&MemberMap> {
        match self {
            Value::Class(class) => Some(&class.members),
            Value::Object(obj) => Some(&obj.members),
            _ => None,
        }
    }

    /// `==` semantics: same kind plus same string form for literals,
    /// identity for reference values.
    pub fn loosely_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::HostFunction(a), Value::HostFunction(b)) => Rc::ptr_eq(a, b),
            (Value::Class(a), Value::Class(b)) => Rc::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            (a, b) if a.is_literal() && a.same_kind(b) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Long(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
            Value::Double(n) => write!(f, "{}", n),
            Value::String(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Null => f.write_str("null"),
            other => f.write_str(other.type_name()),
        }
    }
}

// Objects can reach themselves through members, so containers print shallowly.
impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "String({:?})", s),
            Value::Object(obj) => write!(f, "Object({:?})", obj.members.keys()),
            Value::Class(class) => write!(f, "Class({:?})", class.members.keys()),
            Value::Function(func) => write!(f, "Function({} params)", func.params.len()),
            Value::HostFunction(func) => write!(f, "HostFunction({})", func.name),
            other => write!(f, "{}({})", other.type_name(), other),
        }
    }
}

/// An evaluated type: standard tag, resolved meta values, nullability.
#[derive(Debug, Clone)]
pub struct RuntimeType {
    pub standard: StandardType,
    pub meta: Vec<Value>,
    pub nullable: bool,
}

impl RuntimeType {
    pub fn plain(standard: StandardType) -> Self {
        Self {
            standard,
            meta: Vec::new(),
            nullable: false,
        }
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }
}

impl fmt::Display for RuntimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.standard.name())?;
        match self.meta.as_slice() {
            [] => {}
            [single] => write!(f, ":{}", single.type_name())?,
            many => {
                let names: Vec<&str> = many.iter().map(Value::type_name).collect();
                write!(f, ":[{}]", names.join(", "))?;
            }
        }
        if self.nullable {
            f.write_str("?")?;
        }
        Ok(())
    }
}

/// Whether a value of type `actual` may be stored where `expected` is declared.
pub fn types_match(expected: &RuntimeType, actual: &RuntimeType) -> bool {
    if expected.nullable && actual.standard == StandardType::Void {
        return true;
    }
    standards_match(expected.standard, actual.standard) && metas_match(&expected.meta, &actual.meta)
}

fn standards_match(expected: StandardType, actual: StandardType) -> bool {
    expected == actual
        || expected == StandardType::Dynamic
        || (expected == StandardType::Construct && actual == StandardType::Function)
}

fn metas_match(expected: &[Value], actual: &[Value]) -> bool {
    expected.len() == actual.len() && expected.iter().zip(actual).all(|(e, a)| e.same_kind(a))
}

/// A named, typed slot holding one value.
#[derive(Debug, Clone)]
pub struct Member {
    pub modifiers: Vec<Modifier>,
    pub ty: RuntimeType,
    pub value: Value,
}

impl Member {
    /// Create a member, checking the initial value against its type.
    pub fn new(modifiers: Vec<Modifier>, ty: RuntimeType, value: Value) -> Result<Self, RuntimeError> {
        check_type(&ty, &value)?;
        Ok(Self { modifiers, ty, value })
    }

    /// A `const` member of the given type.
    pub fn constant(ty: RuntimeType, value: Value) -> Result<Self, RuntimeError> {
        Self::new(vec![Modifier::Const], ty, value)
    }

    pub fn is_const(&self) -> bool {
        self.modifiers.contains(&Modifier::Const)
    }

    /// Plain assignment: rejected for constants, type-checked otherwise.
    pub fn assign(&mut self, name: &str, value: Value) -> Result<(), RuntimeError> {
        if self.is_const() {
            return Err(RuntimeError::ConstAssignment(name.to_string()));
        }
        check_type(&self.ty, &value)?;
        self.value = value;
        Ok(())
    }

    /// Redeclaration: modifiers and type are replaced, then the value is checked.
    pub fn reset(&mut self, modifiers: Vec<Modifier>, ty: RuntimeType, value: Value) -> Result<(), RuntimeError> {
        check_type(&ty, &value)?;
        self.modifiers = modifiers;
        self.ty = ty;
        self.value = value;
        Ok(())
    }
}

fn check_type(expected: &RuntimeType, value: &Value) -> Result<(), RuntimeError> {
    let actual = value.runtime_type();
    if types_match(expected, &actual) {
        Ok(())
    } else {
        Err(RuntimeError::TypeMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        })
    }
}

/// Insertion-ordered members of a class or object.
#[derive(Debug, Default)]
pub struct MemberMap {
    entries: RefCell<IndexMap<String, Member>>,
}

impl MemberMap {
    pub fn new(entries: IndexMap<String, Member>) -> Self {
        Self {
            entries: RefCell::new(entries),
        }
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.entries.borrow().get(key).map(|m| m.value.clone())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }

    pub fn keys(&self) -> Vec<String> {
        self.entries.borrow().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Copy of every member, in declaration order.
    pub fn snapshot(&self) -> IndexMap<String, Member> {
        self.entries.borrow().clone()
    }

    /// Declare or redeclare a member.
    pub fn declare(&self, key: &str, modifiers: Vec<Modifier>, ty: RuntimeType, value: Value) -> Result<(), RuntimeError> {
        let mut entries = self.entries.borrow_mut();
        match entries.get_mut(key) {
            Some(existing) => existing.reset(modifiers, ty, value),
            None => {
                entries.insert(key.to_string(), Member::new(modifiers, ty, value)?);
                Ok(())
            }
        }
    }

    /// Assign to an existing member.
    pub fn assign(&self, key: &str, value: Value) -> Result<Value, RuntimeError> {
        let mut entries = self.entries.borrow_mut();
        let member = entries
            .get_mut(key)
            .ok_or_else(|| RuntimeError::NoSuchMember(key.to_string()))?;
        member.assign(key, value.clone())?;
        Ok(value)
    }

    pub fn delete(&self, key: &str) -> Result<(), RuntimeError> {
        self.entries
            .borrow_mut()
            .shift_remove(key)
            .map(|_| ())
            .ok_or_else(|| RuntimeError::DeleteMissing(key.to_string()))
    }
}

/// A parameter of a script or host function.
#[derive(Debug, Clone)]
pub struct ParamSpec {
    pub name: String,
    pub ty: RuntimeType,
    /// Evaluated in the caller's scope when the argument is missing or null.
    pub default: Option<Expr>,
}

/// A script function: evaluated parameter types plus the body to run.
#[derive(Debug)]
pub struct FunctionValue {
    pub params: Vec<ParamSpec>,
    pub return_type: RuntimeType,
    pub body: Vec<Stmt>,
    /// Scope the function was defined in; calls run in a child of it.
    pub closure: Domain,
}

/// Signature of a native function. Arguments are bound by name in the
/// domain passed to the handler.
pub type HostFn = fn(&mut Interpreter, &Domain) -> Result<Value, RuntimeError>;

pub struct HostFunction {
    pub name: &'static str,
    pub params: Vec<ParamSpec>,
    pub handler: HostFn,
}

impl fmt::Debug for HostFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostFunction")
            .field("name", &self.name)
            .field("params", &self.params.len())
            .finish()
    }
}

#[derive(Debug)]
pub struct ClassValue {
    pub superclass: Option<Rc<ClassValue>>,
    pub members: MemberMap,
}

impl ClassValue {
    /// Members of the whole superclass chain, root first, so a subclass
    /// overrides what it inherits.
    pub fn flattened_members(&self) -> IndexMap<String, Member> {
        let mut chain = vec![self];
        let mut current = self.superclass.as_deref();
        while let Some(class) = current {
            chain.push(class);
            current = class.superclass.as_deref();
        }
        let mut flattened = IndexMap::new();
        for class in chain.into_iter().rev() {
            flattened.extend(class.members.snapshot());
        }
        flattened
    }
}

#[derive(Debug)]
pub struct ObjectValue {
    pub members: MemberMap,
    /// Type meta; constructed objects carry their class.
    pub meta: Vec<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ty(standard: StandardType) -> RuntimeType {
        RuntimeType::plain(standard)
    }

    fn class() -> Value {
        Value::Class(Rc::new(ClassValue {
            superclass: None,
            members: MemberMap::default(),
        }))
    }

    #[test]
    fn dynamic_accepts_anything() {
        for value in [Value::Int(1), Value::String("s".into()), Value::Null, class()] {
            assert!(types_match(&ty(StandardType::Dynamic), &value.runtime_type()));
        }
    }

    #[test]
    fn construct_accepts_functions_only() {
        let construct = ty(StandardType::Construct);
        assert!(types_match(&construct, &ty(StandardType::Function)));
        assert!(!types_match(&construct, &ty(StandardType::HostFunction)));
        assert!(!types_match(&ty(StandardType::Function), &construct));
    }

    #[test]
    fn nullable_accepts_null() {
        let expected = ty(StandardType::String).nullable();
        assert!(types_match(&expected, &Value::Null.runtime_type()));
        assert!(!types_match(&ty(StandardType::String), &Value::Null.runtime_type()));
        assert!(!types_match(&expected, &Value::Int(3).runtime_type()));
    }

    #[test]
    fn meta_compares_length_and_kind() {
        let mut expected = ty(StandardType::Object);
        expected.meta = vec![class()];
        let mut actual = ty(StandardType::Object);
        actual.meta = vec![class()];
        assert!(types_match(&expected, &actual));

        actual.meta = vec![Value::Int(1)];
        assert!(!types_match(&expected, &actual));

        actual.meta = vec![class(), class()];
        assert!(!types_match(&expected, &actual));

        actual.meta.clear();
        assert!(!types_match(&expected, &actual));
    }

    #[test]
    fn numbers_are_not_interchangeable() {
        assert!(!types_match(&ty(StandardType::Integer), &ty(StandardType::Long)));
        assert!(!types_match(&ty(StandardType::Double), &ty(StandardType::Float)));
    }

    #[test]
    fn equality_of_literals_and_references() {
        assert!(Value::Int(3).loosely_equals(&Value::Int(3)));
        assert!(!Value::Int(3).loosely_equals(&Value::Long(3)));
        assert!(!Value::String("3".into()).loosely_equals(&Value::Int(3)));
        assert!(Value::Null.loosely_equals(&Value::Null));

        let a = class();
        assert!(a.loosely_equals(&a.clone()));
        assert!(!a.loosely_equals(&class()));
    }

    #[test]
    fn string_forms() {
        assert_eq!(Value::Double(14.0).to_string(), "14");
        assert_eq!(Value::Float(2.5).to_string(), "2.5");
        assert_eq!(Value::Bool(false).to_string(), "false");
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(class().to_string(), "class");
    }

    #[test]
    fn constants_reject_assignment() {
        let mut member = Member::constant(ty(StandardType::Integer), Value::Int(1)).unwrap();
        let err = member.assign("x", Value::Int(2)).unwrap_err();
        assert!(matches!(err, RuntimeError::ConstAssignment(ref n) if n == "x"));
        member.reset(vec![], ty(StandardType::Integer), Value::Int(2)).unwrap();
        member.assign("x", Value::Int(3)).unwrap();
        assert!(matches!(member.value, Value::Int(3)));
    }

    #[test]
    fn member_type_is_enforced() {
        let err = Member::new(vec![], ty(StandardType::Integer), Value::String("a".into())).unwrap_err();
        assert!(matches!(
            err,
            RuntimeError::TypeMismatch { ref expected, ref actual } if expected == "int" && actual == "string"
        ));
    }

    #[test]
    fn subclass_members_win_when_flattened() {
        let mut base = IndexMap::new();
        base.insert("x".to_string(), Member::new(vec![], ty(StandardType::Integer), Value::Int(1)).unwrap());
        base.insert("y".to_string(), Member::new(vec![], ty(StandardType::Integer), Value::Int(2)).unwrap());
        let base = Rc::new(ClassValue { superclass: None, members: MemberMap::new(base) });

        let mut derived = IndexMap::new();
        derived.insert("x".to_string(), Member::new(vec![], ty(StandardType::Integer), Value::Int(10)).unwrap());
        derived.insert("z".to_string(), Member::new(vec![], ty(StandardType::Integer), Value::Int(3)).unwrap());
        let derived = ClassValue { superclass: Some(base), members: MemberMap::new(derived) };

        let flat = derived.flattened_members();
        let keys: Vec<&str> = flat.keys().map(String::as_str).collect();
        assert_eq!(keys, ["x", "y", "z"]);
        assert!(matches!(flat["x"].value, Value::Int(10)));
    }
}
