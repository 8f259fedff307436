//! GraphQL documents sent to the Intuition endpoint.

pub const SEARCH_ATOMS: &str = r#"
query SearchAtoms($searchTerm: String!, $limit: Int!) {
  atoms(
    where: { label: { _ilike: $searchTerm } }
    limit: $limit
    order_by: { vault: { total_shares: desc_nulls_last } }
  ) {
    term_id
    label
    type
    image
    created_at
    vault {
      total_shares
      position_count
    }
    creator {
      id
      label
    }
  }
}
"#;

pub const GET_ATOM: &str = r#"
query GetAtom($atomId: numeric!) {
  atom(id: $atomId) {
    term_id
    label
    type
    image
    created_at
    block_number
    vault {
      total_shares
      position_count
      current_share_price
    }
    creator {
      id
      label
    }
    as_subject_triples_aggregate {
      aggregate {
        count
      }
    }
    as_object_triples_aggregate {
      aggregate {
        count
      }
    }
  }
}
"#;

pub const GET_ATOM_BY_ADDRESS: &str = r#"
query GetAtomByAddress($address: String!, $limit: Int!) {
  atoms(
    where: {
      _or: [
        { label: { _ilike: $address } }
        { creator: { id: { _ilike: $address } } }
      ]
    }
    limit: $limit
  ) {
    term_id
    label
    type
    vault {
      total_shares
      position_count
    }
    creator {
      id
      label
    }
  }
}
"#;

pub const GET_ACCOUNT: &str = r#"
query GetAccount($address: String!, $limit: Int!) {
  account(id: $address) {
    id
    label
    type
    image
    positions(limit: $limit, order_by: { shares: desc }) {
      shares
      created_at
      vault {
        term_id
        total_shares
        position_count
      }
    }
  }
}
"#;

pub const GET_TRIPLES_ABOUT: &str = r#"
query GetTriplesAbout($subjectId: numeric!, $limit: Int!) {
  triples(
    where: { subject_id: { _eq: $subjectId } }
    limit: $limit
    order_by: { vault: { total_shares: desc_nulls_last } }
  ) {
    id
    subject {
      term_id
      label
    }
    predicate {
      term_id
      label
    }
    object {
      term_id
      label
    }
    vault {
      total_shares
      position_count
    }
    counter_vault {
      total_shares
      position_count
    }
    created_at
  }
}
"#;

pub const GET_POSITIONS: &str = r#"
query GetPositions($atomId: numeric!, $limit: Int!) {
  positions(
    where: { vault: { atom_id: { _eq: $atomId } } }
    limit: $limit
    order_by: { shares: desc }
  ) {
    account {
      id
      label
    }
    shares
    created_at
  }
}
"#;

/// Atom, claims about it and stakes on it in one round trip.
pub const GET_TRUST_SIGNALS: &str = r#"
query GetTrustSignals($atomId: numeric!, $limit: Int!) {
  atom(id: $atomId) {
    term_id
    label
    type
    created_at
    vault {
      total_shares
      position_count
    }
    as_subject_triples_aggregate {
      aggregate {
        count
      }
    }
    as_object_triples_aggregate {
      aggregate {
        count
      }
    }
  }
  triples(
    where: { subject_id: { _eq: $atomId } }
    limit: $limit
    order_by: { vault: { total_shares: desc_nulls_last } }
  ) {
    id
    predicate {
      term_id
      label
    }
    object {
      term_id
      label
    }
    vault {
      total_shares
      position_count
    }
    counter_vault {
      total_shares
      position_count
    }
  }
  positions(
    where: { vault: { atom_id: { _eq: $atomId } } }
    limit: $limit
    order_by: { shares: desc }
  ) {
    account {
      id
      label
    }
    shares
    created_at
  }
}
"#;
